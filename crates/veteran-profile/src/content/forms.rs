use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::profile::VeteranProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPrefill {
    pub pre_filled_fields: BTreeMap<String, String>,
    pub priority_fields: Vec<String>,
    pub veteran_specific_fields: Vec<String>,
    pub accessibility_options: Vec<String>,
}

/// JSON label of a serde-renamed enum value.
fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(label)) => label,
        _ => String::new(),
    }
}

pub(crate) fn form_prefill(profile: &VeteranProfile) -> FormPrefill {
    let mut fields = BTreeMap::new();
    let mut priority_fields = Vec::new();
    let mut veteran_specific_fields = Vec::new();
    let mut accessibility_options = Vec::new();

    if profile.is_veteran {
        fields.insert("veteranStatus".to_string(), "true".to_string());
        fields.insert(
            "serviceBranch".to_string(),
            profile.service_branch.label().to_string(),
        );
        fields.insert(
            "serviceEra".to_string(),
            profile.service_era.label().to_string(),
        );
        veteran_specific_fields.extend(
            ["veteranStatus", "serviceBranch", "combatVeteran", "disabilityRating"]
                .map(String::from),
        );

        if profile.combat_veteran {
            fields.insert("combatVeteran".to_string(), "true".to_string());
            veteran_specific_fields
                .extend(["deploymentHistory", "combatTheaters"].map(String::from));
        }

        if profile.disabled_veteran {
            fields.insert("disabledVeteran".to_string(), "true".to_string());
            if let Some(rating) = profile.disability_rating {
                fields.insert("disabilityRating".to_string(), rating.to_string());
            }
            priority_fields.extend(["accessibilityRequirements", "adaptiveNeeds"].map(String::from));
            accessibility_options.extend(profile.accessibility_requirements.iter().cloned());
        }
    }

    fields.insert(
        "preferredContactMethod".to_string(),
        profile.preferred_contact_method.label().to_string(),
    );
    fields.insert(
        "communicationStyle".to_string(),
        label(&profile.communication_style),
    );
    if let Some(budget) = profile.budget_range {
        fields.insert("budgetRange".to_string(), budget.label().to_string());
    }
    fields.insert(
        "timeline".to_string(),
        profile.preferred_timeline.label().to_string(),
    );

    FormPrefill {
        pre_filled_fields: fields,
        priority_fields,
        veteran_specific_fields,
        accessibility_options,
    }
}
