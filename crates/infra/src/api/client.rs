//! Typed client for the remote advertising platform
//!
//! Implements the core ports on top of [`HttpTransport`]. Every method maps to
//! exactly one HTTP call.

use adops_core::{Authenticator, CampaignApi, ReportApi};
use adops_domain::constants::{
    PATH_AUTH, PATH_CITY, PATH_INSERTION_ORDER, PATH_LINE_ITEM, PATH_PROFILE, PATH_REPORT,
    PATH_REPORT_DOWNLOAD,
};
use adops_domain::{
    AdOpsError, AdvertiserId, ApiConfig, City, CityTargetList, Credentials, InsertionOrderId,
    LineItemId, Pixel, ProfileId, ReportRequest, ReportStatus, Result, Session,
};
use async_trait::async_trait;
use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, instrument};

use super::wire::{
    decode, top_level_or_response, AuthCredentials, AuthRequest, AuthResponse, CityResponse,
    Envelope, InsertionOrderResponse, LineItemBody, LineItemPixels, LineItemPixelsUpdate,
    LineItemResponse, ProfileUpdate,
};
use crate::http::HttpTransport;

/// Platform API client
#[derive(Clone, Debug)]
pub struct AdPlatformClient {
    transport: HttpTransport,
}

impl AdPlatformClient {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::from_config(config)?))
    }

    async fn get(&self, session: &Session, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.transport.request_json(Method::GET, path, Some(session.token()), query, None).await
    }

    async fn send(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: &Value,
    ) -> Result<Value> {
        self.transport.request_json(method, path, Some(session.token()), query, Some(body)).await
    }

    async fn line_item(
        &self,
        session: &Session,
        query: &[(&str, String)],
    ) -> Result<LineItemBody> {
        let value = self.get(session, PATH_LINE_ITEM, query).await?;
        let envelope: Envelope<LineItemResponse> = decode(value, "line item")?;
        Ok(envelope.response.line_item)
    }
}

fn to_body<T: serde::Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload)
        .map_err(|err| AdOpsError::Internal(format!("failed to encode request body: {err}")))
}

#[async_trait]
impl Authenticator for AdPlatformClient {
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let body = to_body(&AuthRequest {
            auth: AuthCredentials {
                username: &credentials.username,
                password: credentials.password.expose_secret(),
            },
        })?;

        let value =
            self.transport.request_json(Method::POST, PATH_AUTH, None, &[], Some(&body)).await?;
        let envelope: Envelope<AuthResponse> = decode(value, "auth response")?;

        match envelope.response.token {
            Some(token) if !token.is_empty() => Ok(Session::new(credentials.username.clone(), token)),
            _ => Err(AdOpsError::Auth("authentication response carried no token".to_string())),
        }
    }
}

#[async_trait]
impl CampaignApi for AdPlatformClient {
    #[instrument(skip(self, session))]
    async fn active_cities(&self, session: &Session) -> Result<Vec<City>> {
        let value = self.get(session, PATH_CITY, &[("active", "true".to_string())]).await?;
        let envelope: Envelope<CityResponse> = decode(value, "city list")?;
        debug!(count = envelope.response.cities.len(), "Fetched active cities");
        Ok(envelope.response.cities)
    }

    #[instrument(skip(self, session))]
    async fn insertion_order_line_items(
        &self,
        session: &Session,
        order_id: InsertionOrderId,
    ) -> Result<Vec<LineItemId>> {
        let value = self.get(session, PATH_INSERTION_ORDER, &[("id", order_id.to_string())]).await?;
        let envelope: Envelope<InsertionOrderResponse> = decode(value, "insertion order")?;
        Ok(envelope
            .response
            .insertion_order
            .line_items
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.id)
            .collect())
    }

    #[instrument(skip(self, session))]
    async fn line_item_profile(
        &self,
        session: &Session,
        line_item_id: LineItemId,
    ) -> Result<Option<ProfileId>> {
        let line_item = self.line_item(session, &[("id", line_item_id.to_string())]).await?;
        Ok(line_item.profile_id)
    }

    #[instrument(skip(self, session))]
    async fn line_item_pixels(
        &self,
        session: &Session,
        line_item_id: LineItemId,
        advertiser_id: AdvertiserId,
    ) -> Result<Vec<Pixel>> {
        let query = [("id", line_item_id.to_string()), ("advertiser_id", advertiser_id.to_string())];
        let line_item = self.line_item(session, &query).await?;
        Ok(line_item.pixels.unwrap_or_default())
    }

    #[instrument(skip(self, session, cities), fields(cities = cities.len()))]
    async fn put_profile_cities(
        &self,
        session: &Session,
        profile_id: ProfileId,
        cities: &CityTargetList,
    ) -> Result<()> {
        let body = to_body(&ProfileUpdate::include(profile_id, cities))?;
        self.send(session, Method::PUT, PATH_PROFILE, &[("id", profile_id.to_string())], &body)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, session, pixels), fields(pixels = pixels.len()))]
    async fn put_line_item_pixels(
        &self,
        session: &Session,
        line_item_id: LineItemId,
        advertiser_id: AdvertiserId,
        pixels: &[Pixel],
    ) -> Result<()> {
        let body = to_body(&LineItemPixelsUpdate {
            line_item: LineItemPixels { id: line_item_id, pixels },
        })?;
        let query = [("id", line_item_id.to_string()), ("advertiser_id", advertiser_id.to_string())];
        self.send(session, Method::PUT, PATH_LINE_ITEM, &query, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl ReportApi for AdPlatformClient {
    #[instrument(skip(self, session, request), fields(advertiser_id = request.advertiser_id))]
    async fn create_report(&self, session: &Session, request: &ReportRequest) -> Result<String> {
        let query = [("advertiser_id", request.advertiser_id.to_string())];
        let value =
            self.send(session, Method::POST, PATH_REPORT, &query, &request.to_payload()).await?;

        top_level_or_response(&value, "report_id").filter(|id| !id.is_empty()).ok_or_else(|| {
            AdOpsError::MalformedResponse("report creation response has no report_id".to_string())
        })
    }

    #[instrument(skip(self, session))]
    async fn report_status(&self, session: &Session, report_id: &str) -> Result<ReportStatus> {
        let value = self.get(session, PATH_REPORT, &[("id", report_id.to_string())]).await?;
        let status = top_level_or_response(&value, "execution_status");
        Ok(ReportStatus::from_execution_status(status.as_deref()))
    }

    #[instrument(skip(self, session))]
    async fn download_report(&self, session: &Session, report_id: &str) -> Result<Vec<u8>> {
        self.transport
            .request_bytes(PATH_REPORT_DOWNLOAD, Some(session.token()), &[("id", report_id.to_string())])
            .await
    }
}
