pub mod catalog;

use crate::logic::SimulationPlan;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub plan: SimulationPlan,
}

impl TestScenario {
    #[must_use]
    pub const fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        plan: SimulationPlan,
    ) -> Self {
        Self {
            key,
            name,
            description,
            plan,
        }
    }
}

pub fn get_scenario(key: &str) -> Option<TestScenario> {
    let key = key.to_lowercase();
    catalog::catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key == key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog::catalog_scenarios()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

pub fn scenario_keys() -> Vec<&'static str> {
    catalog::catalog_scenarios()
        .into_iter()
        .map(|scenario| scenario.key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let scenario = get_scenario("SMOKE").unwrap();
        assert_eq!(scenario.key, "smoke");
        assert!(get_scenario("no-such-scenario").is_none());
    }

    #[test]
    fn keys_are_unique() {
        let mut keys = scenario_keys();
        let count = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), count);
        assert_eq!(list_scenarios().len(), count);
    }
}
