//! Integration Tests for the cache test module
//!
//! Drives whole test cases through `run_test` the way a suite would.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use cache_assert::{
    init_tracing, CacheBackend, CacheModule, CacheValue, Config, EngineStatus, ExecutionMode,
    MemoryCache, ModuleError, TestContext,
};
use serde::{Deserialize, Serialize};

// == Helper Functions ==

fn create_test_module() -> (CacheModule, Arc<MemoryCache>) {
    init_tracing();
    let cache = Arc::new(MemoryCache::new());
    (CacheModule::new(cache.clone()), cache)
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Cart {
    owner: String,
    items: Vec<u32>,
}

// == Scenarios ==

#[test]
fn test_users_count_scenario() -> anyhow::Result<()> {
    let (module, _) = create_test_module();

    module.run_test(&TestContext::new("users_count"), |m| {
        m.have_in_cache_forever("users_count", 200);
        m.see_in_cache("users_count", Some(200.into()))?;

        let err = m
            .see_in_cache("users_count", Some(201.into()))
            .unwrap_err();
        assert!(err.is_assertion());
        assert!(err.to_string().contains("users_count"));
        Ok(())
    })?;

    Ok(())
}

#[test]
fn test_store_is_empty_for_next_test() -> anyhow::Result<()> {
    let (module, cache) = create_test_module();

    module.run_test(&TestContext::new("test_a"), |m| {
        m.have_in_cache("session", "abc", 3600);
        m.see_in_cache("session", None)
    })?;

    module.run_test(&TestContext::new("test_b"), |m| {
        m.dont_see_in_cache("session", None)?;
        assert_eq!(m.grab_from_cache("session"), CacheValue::Null);
        Ok(())
    })?;

    assert!(cache.is_empty());
    Ok(())
}

#[test]
fn test_store_is_empty_after_failed_test() {
    let (module, cache) = create_test_module();

    let result = module.run_test(&TestContext::new("failing"), |m| {
        m.have_in_cache_forever("leftover", 1);
        m.dont_see_in_cache("leftover", None)
    });

    assert!(matches!(result, Err(ModuleError::Assertion(_))));
    assert!(cache.is_empty());
}

#[test]
fn test_store_is_empty_after_panicking_test() {
    let (module, cache) = create_test_module();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        module.run_test(&TestContext::new("erroring"), |m| -> cache_assert::Result<()> {
            m.have_in_cache_forever("leftover", 1);
            panic!("unexpected error in test body");
        })
    }));

    assert!(outcome.is_err());
    assert!(cache.is_empty());
}

#[test]
fn test_setup_error_when_engine_missing() {
    init_tracing();
    let cache = Arc::new(MemoryCache::with_status(EngineStatus::missing()));
    let module = CacheModule::new(cache.clone());
    let mut verb_called = false;

    let err = module
        .run_test(&TestContext::new("no_engine"), |m| {
            verb_called = true;
            m.have_in_cache_forever("k", 1);
            Ok(())
        })
        .unwrap_err();

    assert!(err.is_setup());
    assert!(err.to_string().starts_with("[CacheModule]"));
    assert!(!verb_called);
    assert!(cache.is_empty());
}

#[test]
fn test_setup_error_when_cli_disabled() {
    init_tracing();
    let status = EngineStatus {
        enable_cli: false,
        ..EngineStatus::available()
    };
    let cache = Arc::new(MemoryCache::with_status(status));

    let cli = CacheModule::with_mode(cache.clone(), ExecutionMode::Cli);
    assert!(cli
        .run_test(&TestContext::new("cli"), |_| Ok(()))
        .unwrap_err()
        .is_setup());

    let embedded = CacheModule::with_mode(cache, ExecutionMode::Embedded);
    assert!(embedded
        .run_test(&TestContext::new("embedded"), |_| Ok(()))
        .is_ok());
}

#[test]
fn test_false_flag_is_not_seen_with_any_value() -> anyhow::Result<()> {
    let (module, _) = create_test_module();

    module.run_test(&TestContext::new("flag"), |m| {
        m.have_in_cache_forever("flag", false);
        m.see_in_cache("flag", None)?;
        m.dont_see_in_cache("flag", Some("anything".into()))
    })?;

    Ok(())
}

#[test]
fn test_structured_object_round_trip() -> anyhow::Result<()> {
    let (module, _) = create_test_module();
    let cart = Cart {
        owner: "dana".to_string(),
        items: vec![3, 5, 8],
    };
    let value = CacheValue::object("Cart", &cart)?;

    let grabbed = module.run_test(&TestContext::new("cart"), |m| {
        m.have_in_cache("cart:dana", value.clone(), 600);
        m.see_in_cache("cart:dana", Some(value.clone()))?;
        Ok(m.grab_from_cache("cart:dana"))
    })?;

    assert_eq!(grabbed.decode::<Cart>()?, cart);
    Ok(())
}

#[test]
fn test_short_ttl_entry_disappears() -> anyhow::Result<()> {
    let (module, _) = create_test_module();

    module.run_test(&TestContext::new("ttl"), |m| {
        m.have_in_cache("short", "lived", 1);
        m.see_in_cache("short", None)?;
        std::thread::sleep(std::time::Duration::from_millis(1100));
        m.dont_see_in_cache("short", None)
    })?;

    Ok(())
}

#[test]
fn test_flush_inside_a_test() -> anyhow::Result<()> {
    let (module, cache) = create_test_module();

    module.run_test(&TestContext::new("flush"), |m| {
        for i in 0..10 {
            m.have_in_cache_forever(&format!("key_{}", i), i);
        }
        assert_eq!(cache.len(), 10);
        m.flush_cache();
        m.dont_see_in_cache("key_0", None)?;
        m.dont_see_in_cache("key_9", None)
    })?;

    Ok(())
}

#[test]
fn test_global_cache_is_cleared_between_tests() -> anyhow::Result<()> {
    init_tracing();
    let cache = MemoryCache::global();
    cache.set_status(EngineStatus::available());
    let module = CacheModule::new(cache.clone());

    module.run_test(&TestContext::new("global_a"), |m| {
        m.have_in_cache_forever("global_key", "x");
        Ok(())
    })?;

    assert!(!cache.exists("global_key"));
    Ok(())
}

#[test]
fn test_long_keys_and_many_entries_round_trip() -> anyhow::Result<()> {
    init_tracing();
    let config = Config {
        enable_cli: true,
        ..Config::default()
    };
    let cache = Arc::new(MemoryCache::from_config(&config));
    let module = CacheModule::from_config(cache, &config);

    module.run_test(&TestContext::new("bulk"), |m| {
        let long_key = "k".repeat(300);
        m.have_in_cache_forever(&long_key, 1);
        m.see_in_cache(&long_key, Some(1.into()))?;

        for i in 0..10_001 {
            m.have_in_cache_forever(&format!("k{}", i), i);
        }
        m.see_in_cache("k10000", None)?;
        m.see_in_cache("k0", Some(0.into()))
    })?;

    Ok(())
}
