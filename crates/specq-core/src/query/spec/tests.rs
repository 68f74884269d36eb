use super::*;
use crate::{
    ErrorClass, InvalidOperationError, SpecError, query::builder::FieldRef,
    test_fixtures::Account,
};

const ACTIVE: FieldRef = FieldRef::new("active");
const AGE: FieldRef = FieldRef::new("age");
const NAME: FieldRef = FieldRef::new("name");
const TAGS: FieldRef = FieldRef::new("tags");

fn builder() -> SpecBuilder<Account> {
    Specification::builder()
}

#[test]
fn page_two_of_ten_skips_ten() {
    let spec = builder().page(2, 10).build().expect("valid page");

    assert_eq!(spec.skip(), 10);
    assert_eq!(spec.take(), Some(10));
    assert!(spec.is_paging_enabled());
}

#[test]
fn first_page_starts_at_zero() {
    let spec = builder().page(1, 10).build().expect("valid page");

    assert_eq!(spec.skip(), 0);
    assert_eq!(spec.take(), Some(10));
}

#[test]
fn page_rejects_zero_arguments() {
    let err = builder().page(0, 10).build().expect_err("page 0");
    assert!(matches!(
        err,
        SpecError::ArgumentOutOfRange {
            argument: "page_number",
            ..
        }
    ));

    let err = builder().page(1, 0).build().expect_err("size 0");
    assert!(matches!(
        err,
        SpecError::ArgumentOutOfRange {
            argument: "page_size",
            ..
        }
    ));
}

#[test]
fn page_rejects_offset_overflow() {
    let err = builder().page(u32::MAX, 2).build().expect_err("overflow");

    assert_eq!(err.class(), ErrorClass::Argument);
}

#[test]
fn take_zero_is_out_of_range() {
    let err = builder().take_by(0).build().expect_err("take 0");

    assert!(matches!(
        err,
        SpecError::ArgumentOutOfRange { argument: "take", .. }
    ));
}

#[test]
fn skip_and_take_enable_paging_independently() {
    let skip_only = builder().skip_by(5).build().expect("skip");
    assert!(skip_only.is_paging_enabled());
    assert_eq!(skip_only.take(), None);

    let take_only = builder().take_by(3).build().expect("take");
    assert!(take_only.is_paging_enabled());
    assert_eq!(take_only.skip(), 0);

    let plain = builder().build().expect("plain");
    assert!(!plain.is_paging_enabled());
}

#[test]
fn then_by_without_primary_fails() {
    let err = builder().then_by(NAME).build().expect_err("no primary");

    assert_eq!(
        err,
        SpecError::InvalidOperation(InvalidOperationError::ThenByWithoutPrimary)
    );
}

#[test]
fn null_ordering_without_sort_fails() {
    let err = builder().nulls_last().build().expect_err("no sort");

    assert_eq!(
        err,
        SpecError::InvalidOperation(InvalidOperationError::NullOrderingWithoutSort)
    );
}

#[test]
fn order_by_resets_previous_tiers() {
    let spec = builder()
        .order_by(NAME)
        .then_by_desc(AGE)
        .order_by_desc("id")
        .build()
        .expect("valid order");

    let sorts = spec.sorts();
    assert_eq!(sorts.len(), 1);
    assert_eq!(sorts[0].direction(), OrderDirection::Desc);
    assert_eq!(
        sorts[0].key().field_path().map(|p| p.as_str()),
        Some("id")
    );
}

#[test]
fn null_policy_applies_to_the_last_tier() {
    let spec = builder()
        .order_by(NAME)
        .then_by(AGE)
        .nulls_first()
        .build()
        .expect("valid order");

    assert_eq!(spec.sorts()[0].nulls(), NullOrdering::Unspecified);
    assert_eq!(spec.sorts()[1].nulls(), NullOrdering::NullsFirst);
}

#[test]
fn includes_keep_order_and_duplicates() {
    let spec = builder()
        .include(TAGS)
        .include(NAME)
        .include(TAGS)
        .include_path("owner.profile")
        .build()
        .expect("includes");

    let typed: Vec<_> = spec.includes().iter().map(|p| p.as_str()).collect();
    assert_eq!(typed, ["tags", "name", "tags"]);
    assert_eq!(spec.include_paths(), ["owner.profile".to_string()]);

    let hints: Vec<_> = spec.include_hints().iter().map(ToString::to_string).collect();
    assert_eq!(
        hints,
        ["field:tags", "field:name", "field:tags", "path:owner.profile"]
    );
}

#[test]
fn empty_include_path_is_missing_argument() {
    let err = builder().include_path(" ").build().expect_err("empty path");

    assert_eq!(err, SpecError::MissingArgument { argument: "path" });
}

#[test]
fn blank_typed_include_is_missing_argument() {
    let err = builder()
        .include(FieldRef::new(""))
        .include(TAGS)
        .build()
        .expect_err("blank field");

    assert_eq!(err, SpecError::MissingArgument { argument: "path" });
}

#[test]
fn skip_only_window_has_no_row_limit() {
    let window = PageWindow::disabled().with_skip(3);
    assert!(window.is_enabled());
    assert_eq!(window.take(), None);

    let window = window.with_take(2).expect("positive take").with_skip(4);
    assert_eq!((window.skip(), window.take()), (4, Some(2)));
}

#[test]
fn first_error_wins() {
    let err = builder()
        .and(ACTIVE.eq(true))
        .then_by(NAME)
        .page(0, 0)
        .build()
        .expect_err("several mistakes");

    assert_eq!(
        err,
        SpecError::InvalidOperation(InvalidOperationError::MissingStart)
    );
}

#[test]
fn criteria_is_bound_to_one_parameter() {
    let spec = builder()
        .filter(ACTIVE.eq(true))
        .and(AGE.gte(21))
        .or_group(|g| g.or(NAME.eq("root")).or(TAGS.contains("admin")))
        .build()
        .expect("criteria");

    let criteria = spec.criteria().expect("criteria present");
    let free = criteria.free_parameters();
    assert_eq!(free.len(), 1);
    assert!(free.contains(&criteria.parameter().id()));
}

#[test]
fn satisfies_evaluates_in_memory() {
    let spec = builder()
        .filter(ACTIVE.eq(true))
        .and(AGE.gte(21))
        .build()
        .expect("criteria");

    assert!(spec.satisfies(&Account::new(1, "a", true).with_age(21)));
    assert!(!spec.satisfies(&Account::new(2, "b", true).with_age(20)));
    assert!(!spec.satisfies(&Account::new(3, "c", false).with_age(40)));
}

#[test]
fn unfiltered_specification_matches_everything() {
    let spec = Specification::<Account>::all();

    assert!(spec.criteria().is_none());
    assert!(spec.satisfies(&Account::new(1, "a", false)));
}

#[test]
fn specification_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Specification<Account>>();
}
