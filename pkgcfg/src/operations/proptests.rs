//! Property-based tests for the config command.
//!
//! These tests focus on the laws every request must obey regardless of the
//! setting, scope or entry name involved.

use crate::config::{DocumentRole, SettingSchema};
use crate::operations::{CommandEngine, ConfigContext, ConfigRequest, Outcome, Scope};
use crate::Error;
use proptest::prelude::*;
use std::path::Path;

const BOOL_SETTINGS: [&str; 5] = [
    "experimental.new-installer",
    "installer.parallel",
    "virtualenvs.create",
    "virtualenvs.options.always-copy",
    "virtualenvs.options.system-site-packages",
];

const PATH_SETTINGS: [&str; 2] = ["cache-dir", "virtualenvs.path"];

fn context() -> ConfigContext {
    ConfigContext::in_memory(SettingSchema::with_cache_dir(Path::new("/cache")))
}

fn get(context: &mut ConfigContext, path: &str) -> String {
    match CommandEngine::execute(context, ConfigRequest::new(Some(path.to_string()))) {
        Ok(Outcome::Value(value)) => value,
        other => panic!("unexpected get result for {path}: {other:?}"),
    }
}

fn total_saves(context: &ConfigContext) -> usize {
    let documents = context.documents();
    [DocumentRole::Settings, DocumentRole::Credentials]
        .into_iter()
        .flat_map(|role| [Scope::Global, Scope::Local].map(|scope| (role, scope)))
        .filter_map(|(role, scope)| documents.get(role, scope))
        .map(|document| document.save_count())
        .sum()
}

// Strategy for recognized boolean setting paths
fn bool_setting_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(BOOL_SETTINGS.to_vec())
}

// Strategy for a scalar setting paired with a valid raw value
fn scalar_assignment_strategy() -> impl Strategy<Value = (&'static str, String)> {
    prop_oneof![
        (bool_setting_strategy(), any::<bool>()).prop_map(|(path, v)| (path, v.to_string())),
        (
            prop::sample::select(PATH_SETTINGS.to_vec()),
            "(/[a-z0-9_.-]{1,8}){1,3}"
        ),
    ]
}

fn scope_strategy() -> impl Strategy<Value = Scope> {
    prop_oneof![Just(Scope::Global), Just(Scope::Local)]
}

// Strategy for entry names
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}"
}

fn url_strategy() -> impl Strategy<Value = String> {
    "https://[a-z]{1,10}\\.(com|org)/[a-z]{0,8}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // A value that was set is the value that is read back
    #[test]
    fn set_then_get_round_trips(
        (path, value) in scalar_assignment_strategy(),
        scope in scope_strategy()
    ) {
        let mut ctx = context();
        let request = ConfigRequest::new(Some(path.to_string()))
            .with_values(vec![value.clone()])
            .with_scope(scope);
        CommandEngine::execute(&mut ctx, request).unwrap();

        prop_assert_eq!(get(&mut ctx, path), value);
    }

    // Unsetting what was just set restores the previous effective value
    #[test]
    fn set_then_unset_reverts(
        (path, value) in scalar_assignment_strategy(),
        scope in scope_strategy()
    ) {
        let mut ctx = context();
        let before = get(&mut ctx, path);

        let set = ConfigRequest::new(Some(path.to_string()))
            .with_values(vec![value])
            .with_scope(scope);
        CommandEngine::execute(&mut ctx, set).unwrap();
        let unset = ConfigRequest::new(Some(path.to_string()))
            .with_unset(true)
            .with_scope(scope);
        CommandEngine::execute(&mut ctx, unset).unwrap();

        prop_assert_eq!(get(&mut ctx, path), before);
    }

    // Trailing separators never reach the stored path
    #[test]
    fn path_settings_drop_trailing_separators(
        path in prop::sample::select(PATH_SETTINGS.to_vec()),
        base in "(/[a-z0-9_]{1,8}){1,3}",
        trailing in "/{1,3}"
    ) {
        let mut ctx = context();
        let request = ConfigRequest::new(Some(path.to_string()))
            .with_values(vec![format!("{base}{trailing}")]);
        CommandEngine::execute(&mut ctx, request).unwrap();

        prop_assert_eq!(get(&mut ctx, path), base);
    }

    // Repository URLs round-trip under any entry name
    #[test]
    fn repository_round_trips(name in name_strategy(), url in url_strategy()) {
        let mut ctx = context();
        let request = ConfigRequest::new(Some(format!("repositories.{name}")))
            .with_values(vec![url.clone()]);
        CommandEngine::execute(&mut ctx, request).unwrap();

        prop_assert_eq!(get(&mut ctx, &format!("repositories.{name}.url")), url);
    }

    // Wrong value counts are rejected without writing anything
    #[test]
    fn arity_violations_never_write(
        path in bool_setting_strategy(),
        name in name_strategy(),
        extra in prop::collection::vec("[a-z]{1,6}", 2..5)
    ) {
        let mut ctx = context();

        let scalar = ConfigRequest::new(Some(path.to_string())).with_values(extra.clone());
        let err = CommandEngine::execute(&mut ctx, scalar).unwrap_err();
        prop_assert!(
            matches!(err, Error::InvalidArity { .. }),
            "expected an arity error, got {:?}",
            err
        );

        let token = ConfigRequest::new(Some(format!("pypi-token.{name}")))
            .with_values(extra.clone());
        let err = CommandEngine::execute(&mut ctx, token).unwrap_err();
        prop_assert_eq!(
            err.to_string(),
            format!("Expected only one argument (token), got {}", extra.len())
        );

        prop_assert_eq!(total_saves(&ctx), 0);
    }

    // Values combined with unset are always rejected before any lookup
    #[test]
    fn unset_with_values_conflicts(
        path in "[a-z.\\-]{0,20}",
        values in prop::collection::vec("[a-z]{1,6}", 1..4),
        scope in scope_strategy()
    ) {
        let mut ctx = context();
        let request = ConfigRequest::new(Some(path))
            .with_values(values)
            .with_unset(true)
            .with_scope(scope);

        let err = CommandEngine::execute(&mut ctx, request).unwrap_err();
        prop_assert!(
            matches!(err, Error::ConflictingFlags),
            "expected conflicting flags, got {:?}",
            err
        );
        prop_assert_eq!(total_saves(&ctx), 0);
    }

    // Writes touch only the document of the requested scope
    #[test]
    fn scopes_are_isolated(
        path in bool_setting_strategy(),
        value in any::<bool>(),
        scope in scope_strategy()
    ) {
        let mut ctx = context();
        let request = ConfigRequest::new(Some(path.to_string()))
            .with_values(vec![value.to_string()])
            .with_scope(scope);
        CommandEngine::execute(&mut ctx, request).unwrap();

        let other = match scope {
            Scope::Global => Scope::Local,
            Scope::Local => Scope::Global,
        };
        let documents = ctx.documents();
        prop_assert_eq!(documents.get(DocumentRole::Settings, scope).unwrap().save_count(), 1);
        prop_assert_eq!(documents.get(DocumentRole::Settings, other).unwrap().save_count(), 0);
        prop_assert!(documents.get(DocumentRole::Settings, other).unwrap().mapping().is_empty());
    }

    // Listing the same state twice yields the same lines
    #[test]
    fn listing_is_deterministic(
        names in prop::collection::vec(name_strategy(), 0..5),
        url in url_strategy()
    ) {
        let mut ctx = context();
        for name in &names {
            let request = ConfigRequest::new(Some(format!("repo.{name}")))
                .with_values(vec![url.clone()]);
            CommandEngine::execute(&mut ctx, request).unwrap();
        }

        let first = CommandEngine::execute(&mut ctx, ConfigRequest::listing()).unwrap();
        let second = CommandEngine::execute(&mut ctx, ConfigRequest::listing()).unwrap();
        prop_assert_eq!(first, second);
    }
}
