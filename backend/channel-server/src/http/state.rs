use std::sync::Arc;

use domain_types::user::UserRecord;
use interfaces::connector_types::{PaynowPaymentService, StripeCheckoutService};

use crate::{
    channels::{PaynowChannel, StripeChannel},
    configs::Config,
    drivers::{PaynowDriver, StripeDriver},
    storage::{
        in_memory::{InMemorySessionCache, InMemoryUserStore},
        SessionCache, UserStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<dyn SessionCache>,
    pub users: Arc<dyn UserStore>,
    pub paynow: Arc<dyn PaynowPaymentService>,
    pub stripe: Arc<dyn StripeCheckoutService>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        sessions: Arc<dyn SessionCache>,
        users: Arc<dyn UserStore>,
        paynow: Arc<dyn PaynowPaymentService>,
        stripe: Arc<dyn StripeCheckoutService>,
    ) -> Self {
        Self {
            config,
            sessions,
            users,
            paynow,
            stripe,
        }
    }

    /// Production wiring: in-memory stores seeded with the configured demo
    /// user, and the real gateway drivers.
    pub fn from_config(config: Arc<Config>) -> Self {
        let user = UserRecord::new(config.user.name.clone(), config.user.email.clone());
        Self::new(
            Arc::clone(&config),
            Arc::new(InMemorySessionCache::new()),
            Arc::new(InMemoryUserStore::seeded(user)),
            Arc::new(PaynowDriver::new(
                config.proxy.clone(),
                config.connectors.clone(),
            )),
            Arc::new(StripeDriver::new(
                config.proxy.clone(),
                config.connectors.clone(),
            )),
        )
    }

    pub fn paynow_channel(&self) -> PaynowChannel {
        PaynowChannel::new(
            Arc::clone(&self.paynow),
            Arc::clone(&self.sessions),
            Arc::clone(&self.users),
        )
    }

    pub fn stripe_channel(&self) -> StripeChannel {
        StripeChannel::new(
            Arc::clone(&self.stripe),
            Arc::clone(&self.sessions),
            Arc::clone(&self.users),
            self.config.server.base_url.clone(),
        )
    }
}
