//! DTOs for decoding GlobalGiving project search responses.
//!
//! The payload nests the project list as
//! `search.response.projects.project[]`. A response without a `projects`
//! block means the search matched nothing.

use serde::Deserialize;

use crate::domain::DonationRecord;

#[derive(Debug, Deserialize)]
pub(super) struct SearchEnvelopeDto {
    pub(super) search: SearchDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchDto {
    pub(super) response: SearchResponseDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchResponseDto {
    #[serde(default)]
    pub(super) projects: Option<ProjectsDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProjectsDto {
    #[serde(default)]
    pub(super) project: Vec<ProjectDto>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ProjectIdDto {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProjectDto {
    pub(super) id: ProjectIdDto,
    pub(super) title: String,
    #[serde(default)]
    pub(super) summary: Option<String>,
    #[serde(default)]
    pub(super) funding: f64,
    #[serde(default)]
    pub(super) project_link: Option<String>,
    #[serde(default)]
    pub(super) image_link: Option<String>,
}

impl SearchEnvelopeDto {
    pub(super) fn into_domain_records(self) -> Result<Vec<DonationRecord>, String> {
        self.search
            .response
            .projects
            .map(|projects| projects.project)
            .unwrap_or_default()
            .into_iter()
            .map(ProjectDto::into_domain_record)
            .collect()
    }
}

impl ProjectDto {
    fn into_domain_record(self) -> Result<DonationRecord, String> {
        let source_id = match self.id {
            ProjectIdDto::Number(id) => id.to_string(),
            ProjectIdDto::Text(id) => id,
        };
        if !self.funding.is_finite() || self.funding < 0.0 {
            return Err(format!(
                "project {source_id} has invalid funding {}",
                self.funding
            ));
        }
        Ok(DonationRecord {
            source_id,
            amount: self.funding,
            title: self.title,
            summary: self.summary,
            project_url: self.project_link,
            image_url: self.image_link,
        })
    }
}
