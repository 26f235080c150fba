use crate::{
    application::{mapper::CityInfoMapper, validation::validator::RequestValidator},
    domain::city::{gateway::CityInfoGateway, repository::CityInfoRepository},
    infrastructure::mail::traits::MailService,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn CityInfoGateway>,
    pub mapper: Arc<CityInfoMapper>,
    pub validator: Arc<RequestValidator>,
    pub mail_service: Arc<dyn MailService>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn CityInfoGateway>, mail_service: Arc<dyn MailService>) -> Self {
        let mapper = Arc::new(CityInfoMapper::new());
        Self {
            gateway,
            validator: Arc::new(RequestValidator::new(mapper.clone())),
            mapper,
            mail_service,
        }
    }

    /// Fresh unit of work for one request.
    pub fn repository(&self) -> CityInfoRepository {
        CityInfoRepository::new(self.gateway.clone())
    }
}
