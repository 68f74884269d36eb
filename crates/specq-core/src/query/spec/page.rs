use crate::error::SpecError;

///
/// PageWindow
///
/// Skip/take window applied after ordering. Nothing is applied unless
/// `enabled`; every paging operation on a builder enables it.
///
/// `take`, when present, is always positive. An enabled window may have
/// no `take` at all (skip-only), in which case every remaining row is kept.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PageWindow {
    skip: u32,
    take: Option<u32>,
    enabled: bool,
}

impl PageWindow {
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            skip: 0,
            take: None,
            enabled: false,
        }
    }

    /// 1-based page number to an enabled window.
    pub fn for_page(page_number: u32, page_size: u32) -> Result<Self, SpecError> {
        if page_number == 0 {
            return Err(SpecError::out_of_range("page_number", 0, "page numbers start at 1"));
        }
        if page_size == 0 {
            return Err(SpecError::out_of_range("page_size", 0, "page size must be positive"));
        }

        let skip = (page_number - 1).checked_mul(page_size).ok_or_else(|| {
            SpecError::out_of_range(
                "page_number",
                u64::from(page_number),
                "page offset overflows u32",
            )
        })?;

        Ok(Self {
            skip,
            take: Some(page_size),
            enabled: true,
        })
    }

    #[must_use]
    pub const fn skip(&self) -> u32 {
        self.skip
    }

    #[must_use]
    pub const fn take(&self) -> Option<u32> {
        self.take
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable paging with `skip`; an unset `take` stays unset.
    #[must_use]
    pub const fn with_skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self.enabled = true;
        self
    }

    pub fn with_take(mut self, take: u32) -> Result<Self, SpecError> {
        if take == 0 {
            return Err(SpecError::out_of_range("take", 0, "take must be positive"));
        }

        self.take = Some(take);
        self.enabled = true;
        Ok(self)
    }
}
