//! Sample asynchronous fetches with a configurable latency.

use tokio::time::sleep;
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::storefront::Storefront;

const SAMPLE_DATA: [i64; 3] = [1, 2, 3];

impl Storefront {
    /// Resolves with the sample data after `fetch.delay_ms`.
    pub async fn fetch_data(&self) -> ServiceResult<Vec<i64>> {
        sleep(self.config.fetch.delay()).await;
        debug!(items = SAMPLE_DATA.len(), "Fetched sample data");
        Ok(SAMPLE_DATA.to_vec())
    }

    /// Fails after `fetch.delay_ms`.
    pub async fn fetch_data_fail(&self) -> ServiceResult<Vec<i64>> {
        sleep(self.config.fetch.delay()).await;
        Err(ServiceError::FetchFailed {
            reason: "Operation failed".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use std::time::Duration;
    use tokio::time::Instant;

    fn storefront() -> Storefront {
        Storefront::new(StorefrontConfig::default()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_data_waits_then_resolves() {
        let started = Instant::now();

        let data = storefront().fetch_data().await.unwrap();

        assert_eq!(data, vec![1, 2, 3]);
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_data_fail_rejects() {
        let err = storefront().fetch_data_fail().await.unwrap_err();

        assert!(matches!(err, ServiceError::FetchFailed { .. }));
        assert!(err.to_string().contains("fail"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay() {
        let mut config = StorefrontConfig::default();
        config.fetch.delay_ms = 0;
        let storefront = Storefront::new(config).unwrap();

        assert!(storefront.fetch_data().await.is_ok());
    }
}
