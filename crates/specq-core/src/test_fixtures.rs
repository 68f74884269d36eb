use crate::impl_entity;

///
/// Account
/// Entity fixture shared by unit tests across the query modules.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Account {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) active: bool,
    pub(crate) age: Option<u32>,
    pub(crate) tags: Vec<String>,
}

impl Account {
    pub(crate) fn new(id: u64, name: &str, active: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            active,
            age: None,
            tags: Vec::new(),
        }
    }

    pub(crate) const fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub(crate) fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }
}

impl_entity!(
    Account,
    path = "test::Account",
    id = id,
    fields = [id, name, active, age, tags]
);

/// Rows `1..=count`, alternating active flags, ages cycling through a small range.
pub(crate) fn accounts(count: u64) -> Vec<Account> {
    (1..=count)
        .map(|id| {
            let account = Account::new(id, &format!("account-{id:02}"), id % 2 == 1);
            if id % 3 == 0 {
                account
            } else {
                account.with_age(u32::try_from(20 + id % 5).unwrap_or(20))
            }
        })
        .collect()
}
