//! Testing utilities for the worktrack workspace
//!
//! Shared fixtures, item builders and proptest strategies.

#![allow(missing_docs)]

use chrono::NaiveDate;
use proptest::prelude::*;
use worktrack_model::{Issue, IssuePriority, ItemStatus, Project, ProjectStatus, WorkItem};

pub fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).unwrap()
}

pub fn leaf(id: &str, weight: f64, planned: f64, actual: f64) -> WorkItem {
    WorkItem::new(id)
        .with_name(id)
        .with_weight(weight)
        .with_quantities(planned, actual)
}

pub fn child(id: &str, parent: &str, weight: f64) -> WorkItem {
    WorkItem::new(id).with_name(id).with_parent(parent).with_weight(weight)
}

/// root -> a (40, done) and b (60) -> b1 (50, done), b2 (50, untouched)
pub fn deep_tree_items() -> Vec<WorkItem> {
    vec![
        WorkItem::new("root").with_name("root").with_weight(100.0),
        leaf("a", 40.0, 10.0, 10.0).with_parent("root").with_sort_order(1),
        child("b", "root", 60.0).with_sort_order(2),
        leaf("b1", 50.0, 4.0, 4.0).with_parent("b").with_sort_order(1),
        leaf("b2", 50.0, 4.0, 0.0).with_parent("b").with_sort_order(2),
    ]
}

/// A project in execution over Q1 2025 with dated items and two issues
pub fn sample_project() -> Project {
    let items = vec![
        leaf("design", 30.0, 10.0, 10.0)
            .with_status(ItemStatus::Complete)
            .with_plan_start(day(2025, 1, 1))
            .with_plan_end(day(2025, 1, 15))
            .with_actual_end(day(2025, 1, 14)),
        WorkItem::new("build")
            .with_name("build")
            .with_weight(50.0)
            .with_plan_start(day(2025, 1, 16))
            .with_plan_end(day(2025, 3, 15)),
        leaf("frame", 60.0, 100.0, 50.0)
            .with_parent("build")
            .with_status(ItemStatus::Progress)
            .with_plan_end(day(2025, 2, 20)),
        leaf("roof", 40.0, 20.0, 0.0)
            .with_parent("build")
            .with_plan_end(day(2025, 3, 15)),
        leaf("handover", 20.0, 1.0, 0.0).with_plan_end(day(2025, 3, 31)),
    ];
    let issues = vec![
        Issue::new("i1", "Crane inspection overdue")
            .with_priority(IssuePriority::Critical)
            .with_created_at("2025-02-03 10:00"),
        Issue::new("i2", "Paint colour").with_priority(IssuePriority::Low),
    ];
    Project::new("p1", "Warehouse")
        .with_status(ProjectStatus::Execution)
        .with_period(day(2025, 1, 1), day(2025, 3, 31))
        .with_items(items)
        .with_issues(issues)
}

fn arb_status() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![
        Just(ItemStatus::Plan),
        Just(ItemStatus::Progress),
        Just(ItemStatus::Complete),
    ]
}

fn offset_day(offset: Option<u64>) -> Option<NaiveDate> {
    offset.map(|d| day(2025, 1, 1) + chrono::Days::new(d))
}

/// Flat item lists with unique ids, parents drawn from earlier items or
/// left dangling, so the parent graph is always acyclic. Statuses and plan,
/// start and finish dates (within the first 90 days of 2025) are random.
pub fn arb_flat_items(max: usize) -> impl Strategy<Value = Vec<WorkItem>> {
    prop::collection::vec(
        (
            prop::option::of(0..max + 2),
            prop::option::of(-3i64..3),
            prop::option::of(0.0f64..100.0),
            prop::option::of(0.0f64..50.0),
            prop::option::of(0.0f64..50.0),
            arb_status(),
            prop::option::of(0u64..90),
            prop::option::of(0u64..90),
            prop::option::of(0u64..90),
        ),
        0..max,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(
                |(pos, (parent, sort, weight, planned, actual, status, start, end, done))| {
                    let mut item = WorkItem::new(format!("item-{pos}"));
                    item.parent_id = parent.map(|p| {
                        if p < pos {
                            format!("item-{p}")
                        } else {
                            format!("missing-{p}")
                        }
                    });
                    item.sort_order = sort;
                    item.weight = weight;
                    item.planned_quantity = planned;
                    item.actual_quantity = actual;
                    item.status = status;
                    item.plan_start_date = offset_day(start);
                    item.plan_end_date = offset_day(end);
                    item.actual_start_date = offset_day(start);
                    item.actual_end_date = offset_day(done);
                    item
                },
            )
            .collect()
    })
}

/// Arbitrary parent graphs: ids drawn from a small pool (so duplicates are
/// common) and parents pointing anywhere, including the item itself, later
/// items and ids that do not exist. Cycles are frequent.
pub fn arb_parent_graph(max: usize) -> impl Strategy<Value = Vec<WorkItem>> {
    prop::collection::vec(
        (0..max, prop::option::of(0..max + 2), prop::option::of(-3i64..3)),
        0..max,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(id, parent, sort)| {
                let mut item = WorkItem::new(format!("item-{id}"));
                item.parent_id = parent.map(|p| format!("item-{p}"));
                item.sort_order = sort;
                item
            })
            .collect()
    })
}
