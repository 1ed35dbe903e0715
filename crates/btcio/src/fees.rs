use std::{future::Future, sync::Arc, time::Duration};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{BitcoinApi, RecommendedFees};

pub const DEFAULT_FEE_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Creates the recurring fee-fetch job.
///
/// The returned future fetches recommended fees immediately and then once per `interval`,
/// publishing each successful result on the receiver. A failed fetch keeps the last published
/// value. The future completes once every receiver has been dropped.
pub fn fee_job<A>(
    api: Arc<A>,
    interval: Duration,
) -> (
    watch::Receiver<Option<RecommendedFees>>,
    impl Future<Output = ()>,
)
where
    A: BitcoinApi + ?Sized + 'static,
{
    let (tx, rx) = watch::channel(None);
    (rx, fee_job_task(api, interval, tx))
}

async fn fee_job_task<A>(
    api: Arc<A>,
    interval: Duration,
    tx: watch::Sender<Option<RecommendedFees>>,
) where
    A: BitcoinApi + ?Sized,
{
    info!(?interval, "started fee job");

    loop {
        match api.recommended_fees().await {
            Ok(fees) => {
                debug!(fastest = fees.fastest_fee, half_hour = fees.half_hour_fee, "fetched fees");
                if tx.send(Some(fees)).is_err() {
                    break;
                }
            }
            Err(err) => warn!(%err, "failed to fetch recommended fees"),
        }

        tokio::select! {
            _ = tx.closed() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    info!("fee job stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{BtcApiError, MockBitcoinApi};

    fn fees(fastest: u64) -> RecommendedFees {
        RecommendedFees {
            fastest_fee: fastest,
            half_hour_fee: 1,
            hour_fee: 1,
            economy_fee: 1,
            minimum_fee: 1,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_on_every_tick() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut api = MockBitcoinApi::new();
        api.expect_recommended_fees().returning({
            let calls = calls.clone();
            move || {
                let n = calls.fetch_add(1, Ordering::SeqCst) as u64;
                Ok(fees(n + 10))
            }
        });

        let (mut rx, job) = fee_job(Arc::new(api), Duration::from_secs(60));
        let handle = tokio::spawn(job);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().map(|f| f.fastest_fee), Some(10));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().map(|f| f.fastest_fee), Some(11));

        drop(rx);
        handle.await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_keeps_last_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut api = MockBitcoinApi::new();
        api.expect_recommended_fees().returning({
            let calls = calls.clone();
            move || match calls.fetch_add(1, Ordering::SeqCst) {
                0 => Ok(fees(7)),
                _ => Err(BtcApiError::network("connection refused")),
            }
        });

        let (mut rx, job) = fee_job(Arc::new(api), Duration::from_secs(60));
        let handle = tokio::spawn(job);

        rx.changed().await.unwrap();
        tokio::time::sleep(Duration::from_secs(150)).await;

        assert!(calls.load(Ordering::SeqCst) >= 3);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(rx.borrow().map(|f| f.fastest_fee), Some(7));

        drop(rx);
        handle.await.unwrap();
    }
}
