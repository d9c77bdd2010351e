use crate::error::{ProwlError, Result};

/// Limit / offset / page window.
///
/// `offset` and `page` are two ways of expressing the same thing, so
/// setting one clears the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    limit: Option<u64>,
    offset: Option<u64>,
    page: Option<u64>,
}

impl Bounds {
    pub fn set_limit(&mut self, limit: u64) -> Result<()> {
        if limit == 0 {
            return Err(ProwlError::InvalidBounds("limit must be positive"));
        }
        self.limit = Some(limit);
        Ok(())
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.offset = Some(offset);
        self.page = None;
    }

    pub fn set_page(&mut self, page: u64) -> Result<()> {
        if page == 0 {
            return Err(ProwlError::InvalidBounds("page numbers start at 1"));
        }
        if self.limit.is_none() {
            return Err(ProwlError::InvalidBounds("page requires a limit"));
        }
        self.page = Some(page);
        self.offset = None;
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Bounds::default();
    }

    #[inline]
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    #[inline]
    pub fn page(&self) -> Option<u64> {
        self.page
    }

    /// Effective offset, derived from the page when one is set.
    pub fn offset(&self) -> Option<u64> {
        match (self.page, self.limit) {
            (Some(page), Some(limit)) => Some((page - 1).saturating_mul(limit)),
            _ => self.offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset().is_none()
    }
}
