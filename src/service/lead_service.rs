use std::sync::Arc;

use crate::{
    domain::{CreateLeadRequest, Lead, LeadStatus, UpdateLeadRequest},
    error::{AppError, Result},
    mail::Mailer,
    repository::LeadRepository,
};

pub struct LeadService {
    repo: Arc<dyn LeadRepository>,
    mailer: Option<Arc<Mailer>>,
}

impl LeadService {
    pub fn new(repo: Arc<dyn LeadRepository>, mailer: Option<Arc<Mailer>>) -> Self {
        Self { repo, mailer }
    }

    pub async fn create_lead(&self, request: CreateLeadRequest) -> Result<Lead> {
        let lead = self.repo.create(request).await?;

        if let Some(mailer) = &self.mailer {
            let mailer = mailer.clone();
            let for_mail = lead.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer.send_lead_notification(&for_mail).await {
                    tracing::warn!("Failed to send lead notification: {:?}", e);
                }
            });
        }

        Ok(lead)
    }

    pub async fn advance_status(&self, id: i64, status: LeadStatus) -> Result<Lead> {
        let lead = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))?;

        if lead.status == status {
            return Ok(lead);
        }

        self.repo
            .update(
                id,
                UpdateLeadRequest {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await
    }
}
