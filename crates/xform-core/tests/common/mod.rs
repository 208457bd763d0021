//! Property-based strategies for generating well-formed transform configs

#![allow(dead_code)]

use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use xform_core::pivot::{DateHistogramGroupSource, HistogramGroupSource, TermsGroupSource};
use xform_core::{
    DestConfig, FunctionConfig, GroupSource, LatestConfig, PivotConfig, SettingsConfig,
    SourceConfig, SyncConfig, TimeSyncConfig, TransformConfig,
};

const NAME: &str = "[a-z][a-z0-9_]{0,11}";
const INTERVAL: &str = "[1-9][0-9]{0,2}[smhd]";

fn named_objects(op: &'static str) -> impl Strategy<Value = Map<String, Value>> {
    btree_map(NAME, NAME, 0..3).prop_map(move |fields| {
        fields
            .into_iter()
            .map(|(name, field)| (name, json!({ op: { "field": field } })))
            .collect()
    })
}

/// Strategy for generating sources
pub fn source_strategy() -> impl Strategy<Value = SourceConfig> {
    (
        vec(NAME, 1..4),
        option::of((NAME, NAME)),
        option::of(named_objects("script")),
    )
        .prop_map(|(index, term, runtime_mappings)| SourceConfig {
            index,
            query: term.map(|(field, value)| json!({ "term": { field: value } })),
            runtime_mappings,
        })
}

/// Strategy for generating destinations
pub fn dest_strategy() -> impl Strategy<Value = DestConfig> {
    (NAME, option::of(NAME)).prop_map(|(index, pipeline)| DestConfig { index, pipeline })
}

/// Strategy for generating group sources of every type
pub fn group_source_strategy() -> impl Strategy<Value = GroupSource> {
    prop_oneof![
        (NAME, option::of(any::<bool>())).prop_map(|(field, missing_bucket)| {
            GroupSource::Terms(TermsGroupSource {
                field,
                missing_bucket,
            })
        }),
        (NAME, 1u32..1000, option::of(any::<bool>())).prop_map(
            |(field, interval, missing_bucket)| {
                GroupSource::Histogram(HistogramGroupSource {
                    field,
                    interval: f64::from(interval),
                    missing_bucket,
                })
            }
        ),
        (
            NAME,
            any::<bool>(),
            INTERVAL,
            option::of(Just("UTC".to_string())),
            option::of(any::<bool>()),
        )
            .prop_map(|(field, calendar, interval, time_zone, missing_bucket)| {
                let (calendar_interval, fixed_interval) = if calendar {
                    (Some(interval), None)
                } else {
                    (None, Some(interval))
                };
                GroupSource::DateHistogram(DateHistogramGroupSource {
                    field,
                    calendar_interval,
                    fixed_interval,
                    time_zone,
                    missing_bucket,
                })
            }),
    ]
}

/// Strategy for generating pivots
pub fn pivot_strategy() -> impl Strategy<Value = PivotConfig> {
    (
        btree_map(NAME, group_source_strategy(), 1..4),
        option::of(named_objects("avg")),
    )
        .prop_map(|(group_by, aggregations)| PivotConfig {
            group_by,
            aggregations,
        })
}

/// Strategy for generating latest functions
pub fn latest_strategy() -> impl Strategy<Value = LatestConfig> {
    (vec(NAME, 1..4), NAME).prop_map(|(unique_key, sort)| LatestConfig { unique_key, sort })
}

/// Strategy for generating either function
pub fn function_strategy() -> impl Strategy<Value = FunctionConfig> {
    prop_oneof![
        pivot_strategy().prop_map(FunctionConfig::Pivot),
        latest_strategy().prop_map(FunctionConfig::Latest),
    ]
}

/// Strategy for generating settings, including the all-absent one
pub fn settings_strategy() -> impl Strategy<Value = SettingsConfig> {
    (
        option::of(10i32..10_000),
        option::of((1u16..10_000).prop_map(|n| f64::from(n) / 4.0)),
        option::of(any::<bool>()),
    )
        .prop_map(
            |(max_page_search_size, docs_per_second, dates_as_epoch_millis)| SettingsConfig {
                max_page_search_size,
                docs_per_second,
                dates_as_epoch_millis,
            },
        )
}

/// Strategy for generating time-based sync
pub fn sync_strategy() -> impl Strategy<Value = SyncConfig> {
    (NAME, option::of(INTERVAL))
        .prop_map(|(field, delay)| SyncConfig::Time(TimeSyncConfig { field, delay }))
}

/// Strategy for generating well-formed configs, with and without id and destination
pub fn transform_config_strategy() -> impl Strategy<Value = TransformConfig> {
    (
        option::of(NAME),
        source_strategy(),
        function_strategy(),
        option::of(dest_strategy()),
        option::of("[a-zA-Z0-9 ]{0,40}"),
        option::of(INTERVAL),
        option::of(sync_strategy()),
        option::of(settings_strategy()),
        option::of(Just("7.11.0".to_string())),
        option::of(0i64..4_102_444_800_000),
    )
        .prop_map(
            |(id, source, function, dest, description, frequency, sync, settings, version, create_time)| {
                let mut builder = TransformConfig::builder().source(source).function(function);
                if let Some(id) = id {
                    builder = builder.id(id);
                }
                if let Some(dest) = dest {
                    builder = builder.dest(dest);
                }
                if let Some(description) = description {
                    builder = builder.description(description);
                }
                if let Some(frequency) = frequency {
                    builder = builder.frequency(frequency);
                }
                if let Some(sync) = sync {
                    builder = builder.sync(sync);
                }
                if let Some(settings) = settings {
                    builder = builder.settings(settings);
                }
                if let Some(version) = version {
                    builder = builder.version(version);
                }
                if let Some(create_time) = create_time {
                    builder = builder.create_time(create_time);
                }
                builder.build()
            },
        )
}
