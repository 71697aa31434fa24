mod common;

use common::{CallKind, FakeSession, PanicSession, User, user};
use cqlorm::{CqlValue, Record, Session, SessionConfig};

/// Stands in for a scalar: nothing to introspect.
struct Scalar;

impl Record for Scalar {
    const TYPE_NAME: &'static str = "Scalar";
    const FIELDS: &'static [cqlorm::FieldDef] = &[];

    fn field_value(&self, _index: usize) -> cqlorm::OrmResult<CqlValue> {
        Err(cqlorm::OrmError::mapping("scalar"))
    }

    fn field_is_zero(&self, _index: usize) -> bool {
        true
    }

    fn set_field(&mut self, _index: usize, _value: CqlValue) -> Result<(), cqlorm::TypeMismatch> {
        Err(cqlorm::TypeMismatch::new("a mapped field", "a scalar"))
    }
}

#[tokio::test]
async fn insert_then_select_round_trips() {
    let fake = FakeSession::echo();
    let session = Session::new(fake.clone());
    let original = user(42, "erin");

    session.insert().values(&original).exec().await.unwrap();
    let call = fake.last_call();
    assert_eq!(call.kind, CallKind::Execute);
    assert_eq!(call.cql, "INSERT INTO user (\"id\",\"name\") VALUES (?,?)");

    let fetched: User = session.select().from::<User>().one().await.unwrap();
    assert_eq!(fetched, original);
}

#[tokio::test]
async fn latched_insert_never_reaches_the_session() {
    let session = Session::new(PanicSession);

    let err = session
        .insert()
        .values(&Scalar)
        .values(&user(1, "a"))
        .exec()
        .await
        .unwrap_err();
    assert!(err.is_mapping());
}

#[tokio::test]
async fn update_executes_with_set_values_first() {
    let fake = FakeSession::new();
    let session = Session::new(fake.clone());

    session
        .update()
        .set(&user(0, "frank"))
        .filter(&user(7, ""))
        .exec()
        .await
        .unwrap();

    let call = fake.last_call();
    assert_eq!(call.cql, "UPDATE user (\"name\") VALUES (?) WHERE \"id\" = ?");
    assert_eq!(
        call.values,
        vec![CqlValue::Text("frank".into()), CqlValue::BigInt(7)]
    );
}

#[tokio::test]
async fn unscoped_update_is_refused_by_default() {
    let session = Session::new(PanicSession);

    let err = session
        .update()
        .set(&user(0, "frank"))
        .exec()
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn empty_update_is_a_mapping_error_before_the_scope_check() {
    let session = Session::new(PanicSession);

    let err = session
        .update()
        .table("user")
        .exec()
        .await
        .unwrap_err();
    assert!(err.is_mapping());
}

#[tokio::test]
async fn unscoped_update_runs_when_allowed() {
    let fake = FakeSession::new();
    let session = Session::new(fake.clone());

    session
        .update()
        .set(&user(0, "frank"))
        .allow_unscoped()
        .exec()
        .await
        .unwrap();
    assert_eq!(fake.last_call().cql, "UPDATE user (\"name\") VALUES (?)");
}

#[tokio::test]
async fn delete_filters_on_non_zero_fields() {
    let fake = FakeSession::new();
    let session = Session::new(fake.clone());

    session.delete().filter(&user(3, "")).exec().await.unwrap();

    let call = fake.last_call();
    assert_eq!(call.cql, "DELETE FROM user WHERE \"id\" = ?");
    assert_eq!(call.values, vec![CqlValue::BigInt(3)]);
}

#[tokio::test]
async fn unscoped_delete_is_refused_by_default() {
    let session = Session::new(PanicSession);

    let err = session.delete().from::<User>().exec().await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn unscoped_delete_runs_when_the_session_allows_it() {
    let fake = FakeSession::new();
    let session = Session::with_config(
        fake.clone(),
        SessionConfig::new().allow_unscoped_mutations(true),
    );

    session.delete().from::<User>().exec().await.unwrap();
    assert_eq!(fake.last_call().cql, "DELETE FROM user");
}

#[tokio::test]
async fn unbound_delete_is_a_mapping_error() {
    let session = Session::new(PanicSession);

    let err = session.delete().eq("id", 1_i64).exec().await.unwrap_err();
    assert!(err.is_mapping());
}

#[tokio::test]
async fn insert_transport_errors_keep_the_table_in_context() {
    let session = Session::new(FakeSession::failing("write timeout"));

    let err = session
        .insert()
        .values(&user(1, "a"))
        .if_not_exists()
        .exec()
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().contains("insert into user"));
}
