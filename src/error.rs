/// Errors raised while configuring or laying out a composite.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A raw position code is not one of before / above / after / below.
    #[error("position {0} is not one of [BEFORE, ABOVE, AFTER, BELOW]")]
    InvalidPosition(i32),
    /// A geometry setter received a value it can not lay out.
    #[error("invalid {field}: {value} (must be >= 0)")]
    InvalidConfiguration { field: &'static str, value: i32 },
    /// The resource loader had no image for this id.
    #[error("no image for resource id {0}")]
    ImageNotFound(u32),
    /// A font face could not be parsed.
    #[error("font load failed: {0}")]
    FontLoad(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Rejects negative geometry at the setter boundary.
pub(crate) fn non_negative(field: &'static str, value: i32) -> Result<i32> {
    if value < 0 {
        log::warn!("rejected {field} = {value}");
        Err(LayoutError::InvalidConfiguration { field, value })
    } else {
        Ok(value)
    }
}
