//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::state::HttpState;
use super::{api_scope, json_config};
use crate::domain::ports::{
    MockHistoryQuery, MockInventoryCommand, MockInventoryQuery, MockLoginService,
    MockRegistrationService,
};
use crate::middleware::Trace;

/// State whose ports panic on any call, adjusted by `configure`.
pub fn state_with(configure: impl FnOnce(&mut HttpState)) -> HttpState {
    let mut state = HttpState {
        inventory: Arc::new(MockInventoryCommand::new()),
        inventory_query: Arc::new(MockInventoryQuery::new()),
        history: Arc::new(MockHistoryQuery::new()),
        registration: Arc::new(MockRegistrationService::new()),
        login: Arc::new(MockLoginService::new()),
    };
    configure(&mut state);
    state
}

/// App serving the `/api` scope over `state`, traced like production.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(api_scope())
}
