use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use veteran_profile::automation::Money;
use veteran_profile::config::PersonalizationConfig;
use veteran_profile::error::AppError;
use veteran_profile::personalization::{InMemorySessionStore, VeteranPersonalizationSystem};
use veteran_profile::profile::InMemoryProfileStore;
use veteran_profile::vocabulary::Vocabulary;

pub(crate) type InMemorySystem =
    VeteranPersonalizationSystem<InMemoryProfileStore, InMemorySessionStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolve the vocabulary (external file or embedded) and wire the in-memory stores.
pub(crate) fn build_system(config: &PersonalizationConfig) -> Result<InMemorySystem, AppError> {
    let vocabulary = Vocabulary::resolve(config.vocabulary_path.as_deref())?;
    let system = VeteranPersonalizationSystem::in_memory(Arc::new(vocabulary), config)?;
    Ok(system)
}

pub(crate) fn parse_amount(raw: &str) -> Result<Money, String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| *ch != '$' && *ch != ',')
        .collect();
    let dollars = cleaned
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a dollar amount ({err})"))?;
    if !dollars.is_finite() || dollars < 0.0 {
        return Err(format!("'{raw}' must be a non-negative dollar amount"));
    }
    Ok(Money::from_dollars(dollars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_currency_formatting() {
        assert_eq!(parse_amount("$12,500.50"), Ok(Money::from_cents(1_250_050)));
        assert_eq!(parse_amount("800"), Ok(Money::whole_dollars(800)));
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("lots").is_err());
    }

    #[test]
    fn build_system_uses_embedded_vocabulary_by_default() {
        let system = build_system(&PersonalizationConfig::default()).expect("system builds");
        assert_eq!(system.benefits().policy().max_percentage, 15);
    }

    #[test]
    fn build_system_reports_missing_vocabulary_file() {
        let config = PersonalizationConfig {
            vocabulary_path: Some("./no-such-vocabulary.yaml".into()),
            ..PersonalizationConfig::default()
        };
        assert!(matches!(build_system(&config), Err(AppError::Vocabulary(_))));
    }
}
