use crate::auth::PoolConfig;

/// Configuration shared by every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub region: String,
    pub pool: PoolConfig,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(region: String, client_id: String, user_pool_id: String) -> Self {
        Self {
            region,
            pool: PoolConfig::new(client_id, user_pool_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "eu-west-1".to_string(),
            "client-123".to_string(),
            "eu-west-1_Pool".to_string(),
        );
        assert_eq!(args.region, "eu-west-1");
        assert_eq!(args.pool.client_id, "client-123");
        assert_eq!(args.pool.user_pool_id, "eu-west-1_Pool");
    }
}
