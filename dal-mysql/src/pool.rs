use crate::{MySQLDriver, parse_data_source, redact};
use dal_core::{Driver, Error, Failure, Result};
use mysql_async::Pool;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Shared registry of connection pools, one per driver and data source pair.
///
/// Pools are created on first request and live until [`PoolManager::disconnect_all`] or until the
/// manager is dropped. Models sharing a manager and an identity share the same pool.
#[derive(Default)]
pub struct PoolManager {
    pools: Mutex<HashMap<String, Arc<Pool>>>,
}

impl PoolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry key of a driver and data source pair.
    fn key(driver: &str, data_source: &str) -> String {
        format!("{driver}{data_source}")
    }

    /// Data source part of a registry key, for logs.
    fn data_source_of(key: &str) -> &str {
        key.strip_prefix(MySQLDriver::NAME).unwrap_or(key)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Pool>>> {
        self.pools.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The pool registered for `driver` and `data_source`, creating it if missing.
    ///
    /// # Panics
    /// When `driver` is not `"mysql"`, no other backend can ever be served.
    pub fn pool(&self, driver: &str, data_source: &str) -> Result<Arc<Pool>> {
        if driver != MySQLDriver::NAME {
            log::error!(
                "dal: unsupported driver `{driver}`, only `{}` is available",
                MySQLDriver::NAME
            );
            panic!(
                "dal: unsupported driver `{driver}`, only `{}` is available",
                MySQLDriver::NAME
            );
        }
        if data_source.is_empty() {
            let error = Error::msg("dal: the data source is empty, cannot connect")
                .context(Failure::Configuration);
            log::error!("{:#}", error);
            return Err(error);
        }
        let key = Self::key(driver, data_source);
        let mut pools = self.lock();
        if let Some(pool) = pools.get(&key) {
            return Ok(pool.clone());
        }
        let opts = parse_data_source(data_source).map_err(|e| {
            log::error!("{:#}", e);
            e
        })?;
        let pool = Arc::new(Pool::new(opts));
        pools.insert(key, pool.clone());
        log::debug!("dal: created a connection pool for `{}`", redact(data_source));
        Ok(pool)
    }

    /// Number of registered pools.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Disconnect and forget every registered pool, the first failure is returned after all the
    /// pools were attempted.
    pub async fn disconnect_all(&self) -> Result<()> {
        let pools: Vec<(String, Arc<Pool>)> = self.lock().drain().collect();
        let mut result = Ok(());
        for (key, pool) in pools {
            if let Err(e) = Pool::clone(&pool).disconnect().await {
                let error = Error::new(e).context(format!(
                    "dal: failed to disconnect the pool for `{}`",
                    redact(Self::data_source_of(&key))
                ));
                log::error!("{:#}", error);
                if result.is_ok() {
                    result = Err(error);
                }
            }
        }
        result
    }
}
