use chrono::{DateTime, Utc};
use cqlorm::naming::{column_name, table_name};
use cqlorm::{CqlValue, Decoder, Extract, Json, Mapper, Record, extract};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[allow(non_snake_case)]
#[derive(Debug, Default, PartialEq, Record)]
struct UserProfile {
    userID: i64,
    displayName: String,
}

#[derive(Debug, Default, PartialEq, Record)]
#[orm(table = "page_views")]
struct PageView {
    #[orm(column = "view_id")]
    id: Uuid,
    viewed_at: DateTime<Utc>,
    tags: HashSet<String>,
    counters: HashMap<String, i64>,
    referrer: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Settings {
    theme: String,
    beta: bool,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Account {
    r#type: String,
    settings: Json<Settings>,
}

#[test]
fn names_follow_the_snake_case_convention() {
    assert_eq!(table_name::<UserProfile>(), "user_profile");
    let columns: Vec<String> = UserProfile::FIELDS.iter().map(column_name).collect();
    assert_eq!(columns, ["user_id", "display_name"]);
}

#[test]
fn derive_emits_resolved_names() {
    assert_eq!(UserProfile::TABLE, Some("user_profile"));
    assert_eq!(UserProfile::FIELDS[0].column, Some("user_id"));
    assert_eq!(UserProfile::FIELDS[1].column, Some("display_name"));
    assert_eq!(PageView::FIELDS[1].column, Some("viewed_at"));
}

#[test]
fn overrides_are_authoritative() {
    assert_eq!(PageView::TABLE, Some("page_views"));
    assert_eq!(table_name::<PageView>(), "page_views");

    let mapper = Mapper::of::<PageView>().unwrap();
    assert_eq!(
        mapper.columns(),
        ["view_id", "viewed_at", "tags", "counters", "referrer"]
    );
    assert!(mapper.field_index("id").is_err());
}

#[test]
fn raw_identifiers_are_unraw() {
    assert_eq!(Account::FIELDS[0].name, "type");
    assert_eq!(Mapper::of::<Account>().unwrap().columns()[0], "type");
}

#[test]
fn derived_accessors_round_trip() {
    let original = PageView {
        id: Uuid::new_v4(),
        viewed_at: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        tags: HashSet::from(["home".to_string()]),
        counters: HashMap::from([("clicks".to_string(), 3)]),
        referrer: None,
    };

    let pairs = extract(&original, Extract::All).unwrap();
    let (columns, values): (Vec<String>, Vec<CqlValue>) = pairs.into_iter().unzip();
    assert_eq!(values[4], CqlValue::Null);

    let mut decoded = PageView::default();
    Decoder::<PageView>::new()
        .unwrap()
        .decode(&mut decoded, &columns, values)
        .unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn zero_skip_sees_empty_collections_and_none() {
    let view = PageView {
        id: Uuid::new_v4(),
        ..Default::default()
    };
    let pairs = extract(&view, Extract::SkipZero).unwrap();
    let columns: Vec<&str> = pairs.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(columns, ["view_id"]);
}

#[test]
fn json_fields_are_stored_as_text() {
    let account = Account {
        r#type: "admin".into(),
        settings: Json(Settings {
            theme: "dark".into(),
            beta: true,
        }),
    };

    let value = account.field_value(1).unwrap();
    assert_eq!(
        value,
        CqlValue::Text(r#"{"theme":"dark","beta":true}"#.into())
    );

    let mut decoded = Account::default();
    decoded.set_field(1, value).unwrap();
    assert_eq!(decoded.settings, account.settings);
}

#[test]
fn default_json_field_is_skipped_as_zero() {
    let account = Account {
        r#type: "admin".into(),
        settings: Json::default(),
    };
    let pairs = extract(&account, Extract::SkipZero).unwrap();
    assert_eq!(pairs, vec![("type".to_string(), CqlValue::Text("admin".into()))]);
}
