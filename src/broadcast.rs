//! Periodic greeting broadcaster.
//!
//! A single repeating task that POSTs a greeting to the sibling service at a
//! fixed cadence. Delivery is fire-and-forget: a failed or timed-out send is
//! logged and the next tick proceeds as scheduled. The task runs until the
//! returned handle is aborted during shutdown.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};

use crate::config::{
    AppConfig, PodConfig, BROADCAST_INITIAL_DELAY, BROADCAST_PERIOD, BROADCAST_TIMEOUT,
    CLUSTER_DNS_SUFFIX, TARGET_SERVICE_PORT, USER_AGENT,
};
use crate::error::AppError;
use crate::store::{MessagePayload, MessageStore};

/// Periodic broadcaster that greets the sibling service over HTTP.
pub struct Broadcaster {
    client: reqwest::Client,
    target_url: String,
    pod_name: String,
    store: MessageStore,
    initial_delay: Duration,
    period: Duration,
}

/// In-cluster URL of the sibling service's message endpoint.
pub fn target_url(pod: &PodConfig) -> String {
    format!(
        "http://{}.{}.{}:{}/message",
        pod.service_name, pod.namespace, CLUSTER_DNS_SUFFIX, TARGET_SERVICE_PORT
    )
}

impl Broadcaster {
    /// Creates a broadcaster aimed at the cluster-DNS address derived from
    /// the configuration, on the standard schedule.
    pub fn new(config: &AppConfig, store: MessageStore) -> Result<Self, AppError> {
        Self::with_target(
            target_url(&config.pod),
            config.pod.name.clone(),
            store,
            BROADCAST_INITIAL_DELAY,
            BROADCAST_PERIOD,
        )
    }

    /// Creates a broadcaster with an explicit target and schedule.
    pub fn with_target(
        target_url: String,
        pod_name: String,
        store: MessageStore,
        initial_delay: Duration,
        period: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(BROADCAST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            target_url,
            pod_name,
            store,
            initial_delay,
            period,
        })
    }

    /// Spawns the broadcast loop. Abort the handle to stop it.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Broadcast loop: wait out the initial delay, then send one greeting
    /// per period tick. Never returns.
    async fn run(self) {
        tracing::info!(
            target_url = %self.target_url,
            initial_delay_secs = self.initial_delay.as_secs_f64(),
            period_secs = self.period.as_secs_f64(),
            "Broadcaster started"
        );

        sleep(self.initial_delay).await;

        // First tick fires immediately, so sends land at initial_delay,
        // initial_delay + period, and so on.
        let mut ticker = interval(self.period);
        loop {
            ticker.tick().await;
            match self.send_greeting().await {
                Ok(()) => {
                    self.store.mark_broadcast(Utc::now()).await;
                    tracing::debug!(target_url = %self.target_url, "Greeting delivered");
                }
                Err(error) => {
                    tracing::warn!(
                        target_url = %self.target_url,
                        error = %error,
                        "Broadcast failed, will retry next tick"
                    );
                }
            }
        }
    }

    async fn send_greeting(&self) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.target_url)
            .json(&self.greeting())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn greeting(&self) -> MessagePayload {
        MessagePayload {
            from: self.pod_name.clone(),
            text: format!("Hello from {}", self.pod_name),
        }
    }
}
