// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use investmate_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Symbol is empty".into());
        assert_eq!(err.to_string(), "Holding validation failed: Symbol is empty");
    }

    #[test]
    fn validation_error_joined_problems() {
        // The ingestion boundary joins accumulated problems with "; "
        let err = CoreError::ValidationError("Symbol is empty; Fees is empty".into());
        assert_eq!(
            err.to_string(),
            "Holding validation failed: Symbol is empty; Fees is empty"
        );
    }

    #[test]
    fn invalid_input() {
        let err = CoreError::InvalidInput("Unsupported display currency 'XXX'".into());
        assert_eq!(
            err.to_string(),
            "Invalid input: Unsupported display currency 'XXX'"
        );
    }

    #[test]
    fn import_format_error() {
        let err = CoreError::ImportFormatError("Missing required columns: Fees".into());
        assert_eq!(
            err.to_string(),
            "Import format error: Missing required columns: Fees"
        );
    }

    #[test]
    fn import_format_error_empty_message() {
        let err = CoreError::ImportFormatError(String::new());
        assert_eq!(err.to_string(), "Import format error: ");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "API error (Yahoo Finance): rate limited");
    }

    #[test]
    fn api_error_empty_provider() {
        let err = CoreError::Api {
            provider: String::new(),
            message: "unknown".into(),
        };
        assert_eq!(err.to_string(), "API error (): unknown");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn price_unavailable() {
        let err = CoreError::PriceUnavailable {
            symbol: "AAPL".into(),
        };
        assert_eq!(err.to_string(), "Price not available for AAPL");
    }

    #[test]
    fn price_unavailable_empty_symbol() {
        let err = CoreError::PriceUnavailable {
            symbol: String::new(),
        };
        assert_eq!(err.to_string(), "Price not available for ");
    }

    #[test]
    fn rate_fetch_error() {
        let err = CoreError::RateFetchError {
            currency: "EUR".into(),
            message: "timeout".into(),
        };
        assert_eq!(
            err.to_string(),
            "Exchange rate fetch failed for EUR: timeout"
        );
    }

    #[test]
    fn search_unavailable() {
        let err = CoreError::SearchUnavailable("no Finnhub API key configured".into());
        assert_eq!(
            err.to_string(),
            "Symbol search unavailable: no Finnhub API key configured"
        );
    }

    #[test]
    fn history_fetch_error() {
        let err = CoreError::HistoryFetchError {
            symbol: "MSFT".into(),
            message: "empty response".into(),
        };
        assert_eq!(
            err.to_string(),
            "History fetch failed for MSFT: empty response"
        );
    }
}

// ── Debug trait ─────────────────────────────────────────────────────

mod debug_trait {
    use super::*;

    #[test]
    fn all_variants_are_debug() {
        // Ensure Debug is derived and doesn't panic
        let variants: Vec<CoreError> = vec![
            CoreError::ValidationError("test".into()),
            CoreError::InvalidInput("test".into()),
            CoreError::ImportFormatError("test".into()),
            CoreError::FileIO("test".into()),
            CoreError::Api {
                provider: "p".into(),
                message: "m".into(),
            },
            CoreError::Network("test".into()),
            CoreError::PriceUnavailable {
                symbol: "X".into(),
            },
            CoreError::RateFetchError {
                currency: "EUR".into(),
                message: "m".into(),
            },
            CoreError::SearchUnavailable("test".into()),
            CoreError::HistoryFetchError {
                symbol: "X".into(),
                message: "m".into(),
            },
        ];

        for variant in &variants {
            let debug = format!("{:?}", variant);
            assert!(!debug.is_empty());
        }
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(msg) => assert!(msg.contains("file not found")),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_io_error_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(msg) => assert!(msg.contains("access denied")),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_io_error_preserves_message() {
        let msg = "custom IO error with special chars: ąść";
        let io_err = std::io::Error::other(msg);
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(m) => assert!(m.contains(msg)),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_reqwest_error_is_network() {
        // An invalid URL produces a builder error without touching the
        // network
        let reqwest_err = reqwest::Client::new().get("http://").build().unwrap_err();
        let core_err: CoreError = reqwest_err.into();
        match &core_err {
            CoreError::Network(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Network, got {:?}", other),
        }
    }

    #[test]
    fn from_reqwest_error_redacts_query() {
        // The From impl strips everything after '?' so API keys in URLs
        // never reach logs
        let reqwest_err = reqwest::Client::new().get("http://").build().unwrap_err();
        let core_err: CoreError = reqwest_err.into();
        match &core_err {
            CoreError::Network(msg) => {
                if msg.contains('?') {
                    assert!(msg.ends_with("?<query redacted>"));
                }
            }
            other => panic!("Expected Network, got {:?}", other),
        }
    }
}

// ── Error is std::error::Error ──────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> =
            Box::new(CoreError::InvalidInput("test".into()));
        // Should compile and Display should work
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn core_error_implements_send() {
        fn assert_send<T: Send>() {}
        assert_send::<CoreError>();
    }

    #[test]
    fn core_error_implements_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<CoreError>();
    }
}

// ── Edge cases ──────────────────────────────────────────────────────

mod edge_cases {
    use super::*;

    #[test]
    fn very_long_error_message() {
        let long_msg = "x".repeat(10_000);
        let err = CoreError::Network(long_msg.clone());
        assert_eq!(err.to_string(), format!("Network error: {}", long_msg));
    }

    #[test]
    fn unicode_in_error_message() {
        let err = CoreError::Api {
            provider: "日本API".into(),
            message: "接続エラー".into(),
        };
        assert_eq!(err.to_string(), "API error (日本API): 接続エラー");
    }

    #[test]
    fn newlines_in_error_message() {
        let err = CoreError::FileIO("line1\nline2\nline3".into());
        let display = err.to_string();
        assert!(display.contains("line1\nline2\nline3"));
    }

    #[test]
    fn rate_fetch_error_with_special_chars() {
        let err = CoreError::RateFetchError {
            currency: "EUR€".into(),
            message: "status 502 bad gateway".into(),
        };
        let display = err.to_string();
        assert!(display.contains("EUR€"));
        assert!(display.contains("502"));
    }
}
