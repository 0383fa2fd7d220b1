use mathquest_game::constants::{FRONTIER_MAX, SAVE_KEY};
use mathquest_game::{
    Category, MemoryStorage, Persona, QuestEngine, SaveRecord, SilentCues, VisualAid,
};
use serde_json::{Value, json};

/// A record as written by the browser build, including fields this engine ignores.
const LEGACY_RECORD: &str = r#"{
    "unlockedLevel": 4,
    "inventory": [
        { "id": 1, "name": "Merchant's Scale", "desc": "Weighs the value of things.", "rule": "y = k·x", "icon": {} },
        { "id": 2, "name": "Royal Gold Coin", "icon": {} },
        { "id": 3, "name": "Magic Elixir", "icon": {} }
    ],
    "score": 975,
    "mistakesLog": [
        {
            "q": "Split 1200 children in the ratio 2:3.",
            "a": 720,
            "u": "children",
            "e": "Total parts: 5.",
            "category": "ratio_share",
            "data": { "r1": 2, "r2": 3 }
        },
        {
            "q": "Map 1:500,000. Path 4cm.",
            "a": 20,
            "u": "km",
            "category": "map_scale",
            "data": { "cm": 4, "sc": 500000, "u": "km" }
        }
    ]
}"#;

#[test]
fn legacy_record_decodes_field_by_field() {
    let record = SaveRecord::decode(LEGACY_RECORD).unwrap();
    assert_eq!(record.unlocked_level, 4);
    assert_eq!(record.score, 975);
    assert_eq!(record.inventory.len(), 3);
    assert_eq!(record.inventory[1].desc, "");

    let mistakes = record.mistakes_log.all();
    assert_eq!(mistakes.len(), 2);
    assert_eq!(mistakes[0].category, Category::RatioShare);
    assert_eq!(
        mistakes[0].data,
        Some(VisualAid::Parts {
            first: 2,
            second: 3
        })
    );
    assert_eq!(mistakes[1].explanation, None);
    assert!(matches!(
        mistakes[1].data,
        Some(VisualAid::Scale {
            denominator: 500_000,
            ..
        })
    ));
}

#[test]
fn engine_loads_a_legacy_record() {
    let storage = MemoryStorage::new();
    storage.insert(SAVE_KEY, LEGACY_RECORD);
    let engine = QuestEngine::new(storage, SilentCues);
    assert_eq!(engine.state().frontier, 4);
    assert_eq!(engine.state().inventory.ids(), &[1, 2, 3]);
    assert_eq!(engine.session().mistake_review().len(), 2);
}

#[test]
fn written_record_has_the_stored_shape() {
    let storage = MemoryStorage::new();
    let mut engine = QuestEngine::new(storage.clone(), SilentCues);
    engine.select_persona(Persona::Explorer).unwrap();
    engine.enter_topic(1).unwrap();
    engine.submit_answer("3").unwrap();

    let value: Value = serde_json::from_str(&storage.get(SAVE_KEY).unwrap()).unwrap();
    let object = value.as_object().unwrap();
    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["inventory", "mistakesLog", "score", "unlockedLevel"]);
    assert_eq!(value["unlockedLevel"], json!(1));
    assert_eq!(value["inventory"], json!([]));

    let mistake = &value["mistakesLog"][0];
    assert_eq!(mistake["a"], json!(200.0));
    assert_eq!(mistake["category"], json!("prop_direct_fruit"));
    assert!(mistake["q"].as_str().unwrap().contains("water"));
    assert_eq!(mistake["data"]["q1"], json!(5.0));
}

#[test]
fn damaged_records_fall_back_per_field() {
    let raw = json!({
        "unlockedLevel": "three",
        "inventory": "none",
        "score": -12,
        "mistakesLog": [42, { "q": "ok", "a": 1, "category": "recipe_ratio" }]
    })
    .to_string();
    let record = SaveRecord::decode(&raw).unwrap();
    assert_eq!(record.unlocked_level, 1);
    assert!(record.inventory.is_empty());
    assert_eq!(record.score, 0);
    assert_eq!(record.mistakes_log.len(), 1);
}

#[test]
fn corrupt_storage_starts_a_fresh_quest() {
    let storage = MemoryStorage::new();
    storage.insert(SAVE_KEY, "{\"unlockedLevel\": 3,");
    let engine = QuestEngine::new(storage, SilentCues);
    assert_eq!(engine.state().frontier, 1);
    assert_eq!(engine.state().score, 0);
}

#[test]
fn save_of_load_is_idempotent() {
    let first = SaveRecord::decode(LEGACY_RECORD).unwrap();
    let second = SaveRecord::decode(&first.encode().unwrap()).unwrap();
    assert_eq!(first, second);
    let third = SaveRecord::decode(&second.encode().unwrap()).unwrap();
    assert_eq!(second, third);
}

#[test]
fn frontier_is_clamped_to_sentinel() {
    let record = SaveRecord::decode(r#"{ "unlockedLevel": 99 }"#).unwrap();
    assert_eq!(record.unlocked_level, FRONTIER_MAX);
    let state = record.into_state();
    assert!(state.is_quest_complete());
}
