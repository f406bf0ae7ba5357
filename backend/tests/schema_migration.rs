//! Static contract checks for the profile and favourite migration SQL.

use rstest::rstest;

const MIGRATION_UP: &str =
    include_str!("../migrations/2024-06-01-000000_create_profiles_favorites/up.sql");
const MIGRATION_DOWN: &str =
    include_str!("../migrations/2024-06-01-000000_create_profiles_favorites/down.sql");

#[rstest]
#[case("PRIMARY KEY (user_id, slot)")]
#[case("CHECK (slot BETWEEN 1 AND 5)")]
#[case("CONSTRAINT profiles_handle_key UNIQUE (handle)")]
#[case("CHECK (handle ~ '^[A-Za-z0-9_]{3,20}$')")]
fn enforces_slot_and_handle_constraints(#[case] constraint: &str) {
    assert!(
        MIGRATION_UP.contains(constraint),
        "expected up migration to contain: {constraint}"
    );
}

#[rstest]
#[case("CREATE OR REPLACE FUNCTION set_updated_at()")]
#[case("CREATE TRIGGER update_profiles_updated_at")]
#[case("CREATE TRIGGER update_favorites_updated_at")]
fn maintains_updated_at_on_update(#[case] ddl_fragment: &str) {
    assert!(
        MIGRATION_UP.contains(ddl_fragment),
        "expected up migration to contain: {ddl_fragment}"
    );
}

#[rstest]
#[case("DROP TRIGGER IF EXISTS update_favorites_updated_at ON favorites")]
#[case("DROP TRIGGER IF EXISTS update_profiles_updated_at ON profiles")]
#[case("DROP TABLE IF EXISTS favorites")]
#[case("DROP TABLE IF EXISTS profiles")]
#[case("DROP FUNCTION IF EXISTS set_updated_at()")]
fn down_migration_drops_schema_objects(#[case] drop_statement: &str) {
    assert!(
        MIGRATION_DOWN.contains(drop_statement),
        "expected down migration to contain: {drop_statement}"
    );
}
