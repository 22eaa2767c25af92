//! Errors raised while loading a graph into the app shell.

/// Errors that can occur while obtaining graph data
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("Invalid graph data: {0}")]
	InvalidDocument(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::GraphData;

	#[test]
	fn parse_failure_converts_with_message() {
		let err: LoadError = serde_json::from_str::<GraphData>("{\"nodes\": 3}")
			.map(|_| ())
			.unwrap_err()
			.into();
		assert!(matches!(err, LoadError::InvalidDocument(_)));
		assert!(err.to_string().starts_with("Invalid graph data: "));
	}
}
