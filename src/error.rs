use thiserror::Error;

/// Everything that can stop the background from mounting.
///
/// Nothing here is fatal to the page: the wasm entry point logs the error and
/// leaves the hero without a canvas.
#[derive(Debug, Error)]
pub enum AuroraError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("created element is not a canvas")]
    NotACanvas,
    #[error("2d drawing context unavailable")]
    ContextUnavailable,
    #[error("dom call failed: {0}")]
    Dom(String),
    #[error("frame scheduler refused request: {0}")]
    Scheduler(String),
    #[error("size observer failed: {0}")]
    Observer(String),
    #[error("invalid options: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = AuroraError> = std::result::Result<T, E>;

/// Resolves the mount attempted at page start.
///
/// A failure is logged and leaves the page without a background; it is never
/// raised to the page.
pub fn settle_start_mount<T>(result: Result<Option<T>>) -> Option<T> {
    match result {
        Ok(mounted) => mounted,
        Err(err) => {
            log::warn!("aurora not mounted: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_detail() {
        let err = AuroraError::Scheduler("closed".into());
        assert_eq!(err.to_string(), "frame scheduler refused request: closed");
        assert_eq!(
            AuroraError::ContextUnavailable.to_string(),
            "2d drawing context unavailable"
        );
    }

    #[test]
    fn start_mount_failures_are_swallowed() {
        let failed: Result<Option<u8>> = Err(AuroraError::ContextUnavailable);
        assert_eq!(settle_start_mount(failed), None);
        assert_eq!(settle_start_mount::<u8>(Err(AuroraError::NoDocument)), None);
        assert_eq!(settle_start_mount(Ok(Some(7u8))), Some(7));
        assert_eq!(settle_start_mount::<u8>(Ok(None)), None);
    }
}
