use tsdecl_config::TsdeclConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TsdeclConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TsdeclConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.kinds.is_configured() && has_single_underscore_key(&env_keys, "TSDECL_KINDS") {
        warnings.push(
            "Kind table appears unset while TSDECL_KINDS* env vars exist. Use double underscores (example: TSDECL_KINDS__TABLE_PATH)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "TSDECL_WALK") {
        warnings.push(
            "TSDECL_WALK* env vars are ignored without a double underscore (example: TSDECL_WALK__NAMESPACE_SCOPE)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
