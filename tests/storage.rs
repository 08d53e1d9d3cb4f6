mod common;

mod tests {
    use crate::common::MemFlash;
    use monitor_indicator::{
        ConfigStore, FlashConfigStore, Hsi, IndicatorStore, ScreenRegistry, StorageError,
        StoredConfig,
    };

    type Store = IndicatorStore<MemFlash>;

    fn sample() -> StoredConfig<4> {
        let mut registry = ScreenRegistry::<4>::new();
        registry.add("chrome", 3).unwrap();
        registry.add("term", 1).unwrap();
        StoredConfig::capture(&registry, Hsi::new(200.0, 0.5, 90))
    }

    fn write_record(flash: &mut MemFlash, offset: usize, body: &[u8]) {
        let len = u16::try_from(body.len()).unwrap();
        flash.data[offset..offset + 2].copy_from_slice(&0xBEEFu16.to_le_bytes());
        flash.data[offset + 2..offset + 4].copy_from_slice(&len.to_le_bytes());
        flash.data[offset + 4..offset + 4 + body.len()].copy_from_slice(body);
    }

    #[test]
    fn test_blank_flash_has_no_record() {
        let mut store = Store::new(MemFlash::new(), 0);
        let loaded: Option<StoredConfig<4>> = store.load().unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = Store::new(MemFlash::new(), 1024);
        store.save(&sample()).unwrap();

        let loaded: Option<StoredConfig<4>> = store.load().unwrap();
        assert_eq!(loaded, Some(sample()));
        assert_eq!(store.flash().erases, 1);
    }

    #[test]
    fn test_record_layout() {
        let mut store = Store::new(MemFlash::new(), 0);
        store.save(&sample()).unwrap();

        let data = &store.flash().data;
        assert_eq!(data[..2], [0xEF, 0xBE]);
        let len = usize::from(u16::from_le_bytes([data[2], data[3]]));
        let body = core::str::from_utf8(&data[4..4 + len]).unwrap();
        assert!(
            body.starts_with(r#"{"screens":{"chrome":3,"term":1},"color":{"hue":"#),
            "{body}"
        );
        assert!(body.ends_with(r#""intensity":90}}"#), "{body}");
    }

    #[test]
    fn test_save_replaces_record() {
        let mut store = Store::new(MemFlash::new(), 0);
        store.save(&sample()).unwrap();

        let mut registry = ScreenRegistry::<4>::new();
        registry.add("x", 0).unwrap();
        let smaller = StoredConfig::capture(&registry, Hsi::default());
        store.save(&smaller).unwrap();

        let loaded: Option<StoredConfig<4>> = store.load().unwrap();
        assert_eq!(loaded, Some(smaller));
    }

    #[test]
    fn test_escaped_names_survive_reload() {
        let mut registry = ScreenRegistry::<4>::new();
        registry.add(r"\\.\DISPLAY1", 2).unwrap();
        registry.add(r#"say "hi""#, 0).unwrap();
        registry.add("tab\there", 1).unwrap();
        let config = StoredConfig::capture(&registry, Hsi::default());

        let mut store = Store::new(MemFlash::new(), 0);
        store.save(&config).unwrap();
        let loaded: StoredConfig<4> = store.load().unwrap().unwrap();
        assert_eq!(loaded, config);

        // Saving the loaded record again must not escape twice
        store.save(&loaded).unwrap();
        let reloaded: StoredConfig<4> = store.load().unwrap().unwrap();
        assert_eq!(reloaded.registry().resolve(r"\\.\DISPLAY1"), Some(2));
        assert_eq!(reloaded.registry().resolve(r#"say "hi""#), Some(0));
    }

    #[test]
    fn test_pretty_print_matches_record_escaping() {
        let mut registry = ScreenRegistry::<4>::new();
        registry.add(r"\\.\DISPLAY1", 2).unwrap();
        registry.add(r#"say "hi""#, 0).unwrap();
        let config = StoredConfig::capture(&registry, Hsi::default());

        let mut store = Store::new(MemFlash::new(), 0);
        store.save(&config).unwrap();
        let data = &store.flash().data;
        let len = usize::from(u16::from_le_bytes([data[2], data[3]]));
        let body = core::str::from_utf8(&data[4..4 + len]).unwrap();

        let pretty = config.to_string();
        for escaped in [r#""\\\\.\\DISPLAY1""#, r#""say \"hi\"""#] {
            assert!(body.contains(escaped), "{body}");
            assert!(pretty.contains(escaped), "{pretty}");
        }
    }

    #[test]
    fn test_corrupt_record() {
        let mut flash = MemFlash::new();
        write_record(&mut flash, 0, b"{\"screens\":");
        let mut store = Store::new(flash, 0);

        let loaded: Result<Option<StoredConfig<4>>, _> = store.load();
        assert_eq!(loaded, Err(StorageError::InvalidData));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let mut flash = MemFlash::new();
        write_record(&mut flash, 0, br#"{"screens":{"a":1}}"#);
        let mut store = Store::new(flash, 0);

        let loaded: StoredConfig<4> = store.load().unwrap().unwrap();
        assert_eq!(loaded.registry().resolve("a"), Some(1));
        assert_eq!(loaded.color, Hsi::default());

        let mut flash = MemFlash::new();
        write_record(&mut flash, 0, b"{}");
        let mut store = Store::new(flash, 0);
        let loaded: StoredConfig<4> = store.load().unwrap().unwrap();
        assert_eq!(loaded, StoredConfig::default());
    }

    #[test]
    fn test_record_too_large() {
        let mut store = FlashConfigStore::<MemFlash, 16>::new(MemFlash::new(), 0);
        assert_eq!(store.save(&sample()), Err(StorageError::Overflow));
        assert_eq!(store.flash().erases, 0);
    }

    #[test]
    fn test_driver_failure() {
        let mut flash = MemFlash::new();
        flash.fail_writes = true;
        let mut store = Store::new(flash, 0);
        assert_eq!(store.save(&sample()), Err(StorageError::Driver));
    }

    #[test]
    fn test_registry_round_trip() {
        let registry = sample().registry();
        let names: Vec<_> = registry.list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["chrome", "term"]);
        assert_eq!(registry.resolve("chrome"), Some(3));
    }

    #[test]
    fn test_color_is_normalized() {
        let config = StoredConfig::<4> {
            color: Hsi::new(400.0, 2.0, 90),
            ..StoredConfig::default()
        };
        assert_eq!(config.color(), Hsi::new(40.0, 1.0, 90));
    }

    #[test]
    fn test_pretty_print() {
        let mut registry = ScreenRegistry::<4>::new();
        registry.add("chrome", 3).unwrap();
        registry.add("my \"tab\"", -1).unwrap();
        let config = StoredConfig::capture(&registry, Hsi::new(78.0, 1.0, 128));

        let expected = r#"{
  "screens": {
    "chrome": 3,
    "my \"tab\"": -1
  },
  "color": {
    "hue": 78,
    "saturation": 1,
    "intensity": 128
  }
}"#;
        assert_eq!(config.to_string(), expected);
    }

    #[test]
    fn test_pretty_print_empty() {
        let config = StoredConfig::<4>::default();
        let expected = r#"{
  "screens": {},
  "color": {
    "hue": 78,
    "saturation": 1,
    "intensity": 128
  }
}"#;
        assert_eq!(config.to_string(), expected);
    }
}
