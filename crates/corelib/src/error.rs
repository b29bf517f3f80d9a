use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Can't find any element with id '{0}'.")]
    NotFound(String),

    #[error("Element '{id}' is a <{tag}>, expected a <canvas>.")]
    NotACanvas { id: String, tag: String },

    #[error("Host is not available: {0}")]
    HostUnavailable(String),

    #[error("Can't register '{event}' listener: {reason}")]
    Listener { event: &'static str, reason: String },

    #[error("Can't schedule the resize check: {0}")]
    Timer(String),

    #[error("The resize interval must be at least one millisecond.")]
    InvalidInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_element() {
        let err = Error::NotFound("main".to_string());
        assert_eq!(err.to_string(), "Can't find any element with id 'main'.");

        let err = Error::NotACanvas {
            id: "main".to_string(),
            tag: "div".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Element 'main' is a <div>, expected a <canvas>."
        );
    }
}
