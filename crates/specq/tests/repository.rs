//! Repository-style use of specifications: a collaborator owns the rows,
//! evaluates shaped and count-only queries, and assembles pages.

use specq::{
    SpecError,
    core::query::evaluator::{CountOptimizedSpecification, MemorySource},
    impl_entity,
    prelude::*,
};

#[derive(Clone, Debug, PartialEq)]
struct Order {
    id: u64,
    customer: String,
    status: String,
    total: u64,
    shipped_at: Option<u64>,
    lines: Vec<String>,
}

impl_entity!(
    Order,
    path = "shop::Order",
    id = id,
    fields = [id, customer, status, total, shipped_at, lines]
);

const CUSTOMER: FieldRef = FieldRef::new("customer");
const STATUS: FieldRef = FieldRef::new("status");
const TOTAL: FieldRef = FieldRef::new("total");
const SHIPPED_AT: FieldRef = FieldRef::new("shipped_at");
const LINES: FieldRef = FieldRef::new("lines");

fn orders() -> Vec<Order> {
    (1..=25)
        .map(|id| Order {
            id,
            customer: if id % 2 == 0 { "acme" } else { "globex" }.to_string(),
            status: match id % 3 {
                0 => "open",
                1 => "shipped",
                _ => "cancelled",
            }
            .to_string(),
            total: (id * 37) % 200,
            shipped_at: (id % 3 == 1).then_some(1_000 + id),
            lines: vec![format!("sku-{}", id % 4)],
        })
        .collect()
}

///
/// OrderRepository
///

struct OrderRepository {
    rows: Vec<Order>,
    evaluator: SpecificationEvaluator,
}

impl OrderRepository {
    fn new(rows: Vec<Order>) -> Self {
        Self {
            rows,
            evaluator: SpecificationEvaluator::new(
                EvaluationOptions::default().with_stable_sort_by_id(true),
            ),
        }
    }

    fn list(&self, spec: &Specification<Order>) -> Vec<Order> {
        let Ok(rows) = self
            .evaluator
            .fetch(MemorySource::new(self.rows.clone()), spec);
        rows
    }

    fn count(&self, spec: &Specification<Order>) -> u64 {
        let Ok(total) = self
            .evaluator
            .count(MemorySource::new(self.rows.clone()), spec);
        total
    }

    fn paginate(&self, spec: &Specification<Order>) -> PaginatedResult<Order> {
        let window = spec.page_window();
        let page_size = window.take().unwrap_or(u32::MAX);
        let page_number = window.skip() / page_size + 1;

        PaginatedResult::new(self.list(spec), self.count(spec), page_number, page_size)
    }
}

#[test]
fn pages_and_totals_come_from_the_same_specification() {
    let repo = OrderRepository::new(orders());
    let spec = Specification::<Order>::builder()
        .filter(CUSTOMER.eq("acme"))
        .and_not(STATUS.eq("cancelled"))
        .page(2, 3)
        .build()
        .expect("spec");

    let page = repo.paginate(&spec);

    // acme = even ids; cancelled = id % 3 == 2
    let expected: Vec<u64> = (1..=25)
        .filter(|id| id % 2 == 0 && id % 3 != 2)
        .collect();
    assert_eq!(page.total_count, expected.len() as u64);
    assert_eq!(
        page.items.iter().map(|o| o.id).collect::<Vec<_>>(),
        expected[3..6]
    );
    assert_eq!(page.page_number, 2);
    assert!(page.has_previous_page());
    assert!(page.has_next_page());
}

#[test]
fn walking_every_page_visits_each_row_once() {
    let repo = OrderRepository::new(orders());
    let total = repo.count(&Specification::all());

    let mut seen = Vec::new();
    for page_number in 1.. {
        let spec = Specification::<Order>::builder()
            .page(page_number, 4)
            .build()
            .expect("spec");
        let page = repo.paginate(&spec);
        seen.extend(page.items.iter().map(|o| o.id));
        if !page.has_next_page() {
            break;
        }
    }

    assert_eq!(seen.len() as u64, total);
    assert_eq!(seen, (1..=25).collect::<Vec<u64>>());
}

#[test]
fn shipped_orders_sort_with_unshipped_last() {
    let repo = OrderRepository::new(orders());
    let spec = Specification::<Order>::builder()
        .filter(TOTAL.gte(100_u64))
        .order_by_desc(SHIPPED_AT)
        .nulls_last()
        .then_by("id")
        .build()
        .expect("spec");

    let rows = repo.list(&spec);
    let first_unshipped = rows
        .iter()
        .position(|o| o.shipped_at.is_none())
        .unwrap_or(rows.len());

    assert!(rows[..first_unshipped].iter().all(|o| o.shipped_at.is_some()));
    assert!(rows[first_unshipped..].iter().all(|o| o.shipped_at.is_none()));
    assert!(
        rows[..first_unshipped]
            .windows(2)
            .all(|pair| pair[0].shipped_at >= pair[1].shipped_at)
    );
    assert!(
        rows[first_unshipped..]
            .windows(2)
            .all(|pair| pair[0].id < pair[1].id)
    );
}

#[test]
fn grouped_criteria_respect_parentheses() {
    let repo = OrderRepository::new(orders());

    // status = open AND (customer = acme OR lines CONTAINS sku-1)
    let spec = Specification::<Order>::builder()
        .filter(STATUS.eq("open"))
        .group(|g| g.or(CUSTOMER.eq("acme")).or(LINES.contains("sku-1")))
        .build()
        .expect("spec");

    let rows = repo.list(&spec);

    assert!(!rows.is_empty());
    for order in &rows {
        assert_eq!(order.status, "open");
        assert!(order.customer == "acme" || order.lines.contains(&"sku-1".to_string()));
    }
}

#[test]
fn combined_specifications_keep_only_criteria() {
    let repo = OrderRepository::new(orders());
    let acme = Specification::<Order>::builder()
        .filter(CUSTOMER.eq("acme"))
        .order_by_desc(TOTAL)
        .take_by(2)
        .build()
        .expect("spec");
    let open = Specification::<Order>::builder()
        .filter(STATUS.eq("open"))
        .build()
        .expect("spec");

    let both = &acme & &open;
    let either = any_of([&acme, &open]).expect("two operands");

    // id % 6 == 0 for acme + open
    assert_eq!(repo.count(&both), 4);
    assert_eq!(repo.list(&both).len(), 4);
    assert_eq!(repo.count(&either), 12 + 8 - 4);
    assert_eq!(repo.count(&!&acme), 13);
}

#[test]
fn count_view_can_be_passed_explicitly() {
    let repo = OrderRepository::new(orders());
    let spec = Specification::<Order>::builder()
        .filter(STATUS.eq("shipped"))
        .page(1, 2)
        .build()
        .expect("spec");
    let view = CountOptimizedSpecification::<Order, _>::new(&spec);

    let Ok(rows) = repo
        .evaluator
        .fetch(MemorySource::new(repo.rows.clone()), &view);

    assert_eq!(rows.len() as u64, repo.count(&spec));
}

#[test]
fn builder_misuse_surfaces_before_evaluation() {
    let err = Specification::<Order>::builder()
        .order_by(TOTAL)
        .then_by(CUSTOMER)
        .or(STATUS.eq("open"))
        .build()
        .expect_err("or before filter");

    assert_eq!(err, SpecError::InvalidOperation(specq::InvalidOperationError::MissingStart));
    assert_eq!(err.class(), specq::ErrorClass::InvalidOperation);
    assert!(!specq::VERSION.is_empty());
}

#[test]
fn page_of_identifiers_serializes_for_transport() {
    let repo = OrderRepository::new(orders());
    let spec = Specification::<Order>::builder()
        .filter(STATUS.eq("open"))
        .page(1, 5)
        .build()
        .expect("spec");

    let page = repo.paginate(&spec);
    let ids = PaginatedResult::new(
        page.items.iter().map(|o| o.id).collect::<Vec<_>>(),
        page.total_count,
        page.page_number,
        page.page_size,
    );
    let json = serde_json::to_value(&ids).expect("serialize");

    // open = id % 3 == 0
    assert_eq!(json["total_count"], 8);
    assert_eq!(json["page_number"], 1);
    assert_eq!(json["page_size"], 5);
    assert_eq!(json["items"], serde_json::json!([3, 6, 9, 12, 15]));
}
