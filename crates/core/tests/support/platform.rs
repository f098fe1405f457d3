//! Mock implementation of the campaign and authentication ports

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use adops_core::{Authenticator, CampaignApi};
use adops_domain::{
    AdOpsError, AdvertiserId, City, CityTarget, CityTargetList, Credentials, InsertionOrderId,
    LineItemId, Pixel, ProfileId, Result, Session,
};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPut {
    Profile { profile_id: ProfileId, cities: Vec<CityTarget> },
    Pixels { line_item_id: LineItemId, advertiser_id: AdvertiserId, pixels: Vec<Pixel> },
}

/// Scriptable in-memory platform.
#[derive(Default)]
pub struct MockPlatform {
    cities: Vec<City>,
    orders: HashMap<InsertionOrderId, Vec<LineItemId>>,
    profiles: HashMap<LineItemId, Result<Option<ProfileId>>>,
    pixels: HashMap<LineItemId, Vec<Pixel>>,
    put_failures: Mutex<VecDeque<AdOpsError>>,
    puts: Mutex<Vec<RecordedPut>>,
    put_attempts: Mutex<u32>,
    auth_calls: Mutex<u32>,
    auth_result: Option<Result<String>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, id: u64, name: &str, country: &str) -> Self {
        self.cities.push(City {
            id,
            name: name.to_string(),
            country_name: Some(country.to_string()),
        });
        self
    }

    pub fn with_order(mut self, order_id: InsertionOrderId, line_items: Vec<LineItemId>) -> Self {
        self.orders.insert(order_id, line_items);
        self
    }

    pub fn with_profile(mut self, line_item_id: LineItemId, profile: Result<Option<ProfileId>>) -> Self {
        self.profiles.insert(line_item_id, profile);
        self
    }

    pub fn with_pixels(mut self, line_item_id: LineItemId, pixels: Vec<Pixel>) -> Self {
        self.pixels.insert(line_item_id, pixels);
        self
    }

    /// Fail the next PUT calls with these errors, in order.
    pub fn with_put_failures(self, failures: Vec<AdOpsError>) -> Self {
        *self.put_failures.lock().expect("lock") = failures.into();
        self
    }

    pub fn with_auth_result(mut self, result: Result<String>) -> Self {
        self.auth_result = Some(result);
        self
    }

    /// Successful PUTs, in order.
    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().expect("lock").clone()
    }

    /// Every PUT call, including failed attempts.
    pub fn put_attempts(&self) -> u32 {
        *self.put_attempts.lock().expect("lock")
    }

    pub fn auth_calls(&self) -> u32 {
        *self.auth_calls.lock().expect("lock")
    }

    fn record_put(&self, put: RecordedPut) -> Result<()> {
        *self.put_attempts.lock().expect("lock") += 1;
        if let Some(err) = self.put_failures.lock().expect("lock").pop_front() {
            return Err(err);
        }
        self.puts.lock().expect("lock").push(put);
        Ok(())
    }
}

#[async_trait]
impl CampaignApi for MockPlatform {
    async fn active_cities(&self, _session: &Session) -> Result<Vec<City>> {
        Ok(self.cities.clone())
    }

    async fn insertion_order_line_items(
        &self,
        _session: &Session,
        order_id: InsertionOrderId,
    ) -> Result<Vec<LineItemId>> {
        self.orders
            .get(&order_id)
            .cloned()
            .ok_or_else(|| AdOpsError::Transport(format!("404 insertion order {order_id}")))
    }

    async fn line_item_profile(
        &self,
        _session: &Session,
        line_item_id: LineItemId,
    ) -> Result<Option<ProfileId>> {
        self.profiles.get(&line_item_id).cloned().unwrap_or(Ok(None))
    }

    async fn line_item_pixels(
        &self,
        _session: &Session,
        line_item_id: LineItemId,
        _advertiser_id: AdvertiserId,
    ) -> Result<Vec<Pixel>> {
        Ok(self.pixels.get(&line_item_id).cloned().unwrap_or_default())
    }

    async fn put_profile_cities(
        &self,
        _session: &Session,
        profile_id: ProfileId,
        cities: &CityTargetList,
    ) -> Result<()> {
        self.record_put(RecordedPut::Profile { profile_id, cities: cities.as_slice().to_vec() })
    }

    async fn put_line_item_pixels(
        &self,
        _session: &Session,
        line_item_id: LineItemId,
        advertiser_id: AdvertiserId,
        pixels: &[Pixel],
    ) -> Result<()> {
        self.record_put(RecordedPut::Pixels { line_item_id, advertiser_id, pixels: pixels.to_vec() })
    }
}

#[async_trait]
impl Authenticator for MockPlatform {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        *self.auth_calls.lock().expect("lock") += 1;
        match self.auth_result.clone().unwrap_or_else(|| Ok("mock-token".to_string())) {
            Ok(token) => Ok(Session::new(credentials.username.clone(), token)),
            Err(err) => Err(err),
        }
    }
}
