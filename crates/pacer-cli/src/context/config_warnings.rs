use pacer_config::PacerConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &PacerConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &PacerConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.oracle.is_configured() && has_env_prefix(&env_keys, "PACER_ORACLE") {
        warnings.push(
            "Oracle config appears default while PACER_ORACLE* env vars exist. Use double underscores (example: PACER_ORACLE__API_KEY)."
                .to_string(),
        );
    }

    if config.ranking.cache_ttl_secs == pacer_rank::DEFAULT_TTL_SECS
        && has_env_key(&env_keys, "PACER_RANKING_CACHE_TTL_SECS")
    {
        warnings.push(
            "PACER_RANKING_CACHE_TTL_SECS is ignored. Use double underscores (example: PACER_RANKING__CACHE_TTL_SECS)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

fn has_env_key(keys: &[String], name: &str) -> bool {
    keys.iter().any(|key| key == name)
}
