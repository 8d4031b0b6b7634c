//! "Array vs Vec Difference": a small side-by-side of fixed arrays and vectors.

use super::ToolHandler;
use crate::types::{InputField, ToolOutput};
use anyhow::Result;
use async_trait::async_trait;
use std::hint::black_box;
use std::time::{Duration, Instant};

const ITERATIONS: u32 = 100_000;

const FEATURES: &[(&str, &str, &str)] = &[
    ("Length", "Fixed at compile time", "Grows and shrinks at runtime"),
    ("Storage", "Inline (stack or parent)", "Heap buffer"),
    ("Type", "[T; N]", "Vec<T>"),
    ("Push / pop", "Not available", "Available"),
    ("Copy", "When T: Copy", "Never (clone instead)"),
    ("Use case", "Known, small, fixed sets", "Collections of unknown size"),
];

/// Time `f` over [`ITERATIONS`] runs.
fn time<T>(mut f: impl FnMut() -> T) -> Duration {
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        black_box(f());
    }
    start.elapsed()
}

pub struct ArrayVsVec;

impl ArrayVsVec {
    pub fn feature_table() -> Vec<String> {
        let mut rows = vec![format!("{:<12} | {:<26} | {}", "Feature", "Array", "Vec")];
        rows.push("-".repeat(70));
        for (feature, array, vec) in FEATURES {
            rows.push(format!("{:<12} | {:<26} | {}", feature, array, vec));
        }
        rows
    }
}

#[async_trait]
impl ToolHandler for ArrayVsVec {
    fn entrypoint(&self) -> &str {
        "array_vs_vec"
    }

    fn title(&self) -> &str {
        "Array vs Vec"
    }

    fn fields(&self) -> Vec<InputField> {
        Vec::new()
    }

    fn action_label(&self) -> &str {
        "Compare"
    }

    async fn execute(&self, _params: &serde_json::Value) -> Result<ToolOutput> {
        let array = [1u64, 2, 3, 4, 5];
        let vec = vec![1u64, 2, 3, 4, 5];

        let array_time = time(|| [1u64, 2, 3, 4, 5]);
        let vec_time = time(|| vec![1u64, 2, 3, 4, 5]);

        let mut grown = vec.clone();
        grown.push(6);
        let mut replaced = array;
        replaced[0] = 10;

        let mut out = ToolOutput::new("Array vs Vec", "Compared array vs vec");
        for row in Self::feature_table() {
            out = out.detail(row);
        }
        Ok(out
            .detail("")
            .detail(format!(
                "Size: array {} bytes inline, vec {} bytes header + {} bytes heap",
                std::mem::size_of_val(&array),
                std::mem::size_of_val(&vec),
                vec.capacity() * std::mem::size_of::<u64>()
            ))
            .detail(format!(
                "Creation x{}: array {:?}, vec {:?}",
                ITERATIONS, array_time, vec_time
            ))
            .detail(format!("Vec after push(6): {:?}", grown))
            .detail(format!("Array after [0] = 10: {:?}", replaced)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn table_has_header_and_rows() {
        let table = ArrayVsVec::feature_table();
        assert_eq!(table.len(), FEATURES.len() + 2);
        assert!(table[0].starts_with("Feature"));
    }

    #[tokio::test]
    async fn comparison_reports_sizes_and_mutation() {
        let out = ArrayVsVec.execute(&json!({})).await.unwrap();
        assert_eq!(out.log_message, "Compared array vs vec");
        assert!(out.details.iter().any(|d| d.starts_with("Size: array 40 bytes")));
        assert!(out.details.iter().any(|d| d == "Vec after push(6): [1, 2, 3, 4, 5, 6]"));
        assert!(out.details.iter().any(|d| d == "Array after [0] = 10: [10, 2, 3, 4, 5]"));
    }
}
