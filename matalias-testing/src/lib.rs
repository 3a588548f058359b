//! Internal testing utilities for the matalias crates.

use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};

/// Runs table-driven tests over a collection of cases.
///
/// Conventionally the case type is a `#[derive(Debug)] struct Case` declared
/// inside the test function and the collection is an array named `cases`:
///
/// ```
/// use matalias_testing::TestCases;
///
/// fn test_product() {
///   #[derive(Debug)]
///   struct Case {
///     bounds: &'static [usize],
///     expected: usize,
///   }
///
///   let cases = [
///     Case { bounds: &[3, 4, 5], expected: 60 },
///     Case { bounds: &[7], expected: 7 },
///   ];
///
///   cases.test_each(|case| {
///     assert_eq!(case.bounds.iter().product::<usize>(), case.expected);
///   });
/// }
/// # test_product();
/// ```
///
/// Every case is run even if earlier ones fail. Panics are caught, and once
/// all cases have run the failing ones are reported together in a single
/// panic that includes their `Debug` output.
///
/// Cases and anything captured by the test closure must be unwind safe.
/// Wrap offending values in [`AssertUnwindSafe`](std::panic::AssertUnwindSafe)
/// or construct them inside the closure instead.
pub trait TestCases {
    /// The data for a single test case.
    type Case;

    /// Call `test` with a reference to each case.
    fn test_each(self, test: impl Fn(&Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe;

    /// Call `test` with each case by value.
    ///
    /// The debug representation of each case is captured before it is moved
    /// into the test function, so that failures can still be reported.
    fn test_each_value(self, test: impl Fn(Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe;
}

fn report_failures<F: Debug>(failures: &[F]) {
    assert!(
        failures.is_empty(),
        "{} test cases failed: {:?}",
        failures.len(),
        failures
    );
}

impl<I: IntoIterator> TestCases for I {
    type Case = I::Item;

    fn test_each(self, test: impl Fn(&I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe,
    {
        let failures: Vec<_> = self
            .into_iter()
            .filter(|case| std::panic::catch_unwind(|| test(case)).is_err())
            .collect();
        report_failures(&failures);
    }

    fn test_each_value(self, test: impl Fn(I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe,
    {
        let mut failures = Vec::new();
        for case in self {
            let desc = format!("{:?}", case);
            let test = &test;
            if std::panic::catch_unwind(move || test(case)).is_err() {
                failures.push(desc);
            }
        }
        report_failures(&failures);
    }
}

#[cfg(test)]
mod tests {
    use super::TestCases;

    #[test]
    fn test_all_cases_pass() {
        #[derive(Debug)]
        struct Case {
            bound: usize,
        }

        [Case { bound: 1 }, Case { bound: 2 }].test_each(|case| assert!(case.bound > 0));
        [Case { bound: 3 }].test_each_value(|case| assert!(case.bound > 0));
    }

    #[test]
    #[should_panic(expected = "1 test cases failed")]
    fn test_each_reports_failure() {
        #[derive(Debug)]
        struct Case {
            bound: usize,
        }

        [Case { bound: 0 }, Case { bound: 4 }].test_each(|case| assert!(case.bound > 0));
    }

    #[test]
    #[should_panic(expected = "2 test cases failed")]
    fn test_each_value_reports_failure() {
        #[derive(Debug)]
        struct Case {
            bound: usize,
        }

        [Case { bound: 0 }, Case { bound: 0 }].test_each_value(|case| assert!(case.bound > 0));
    }
}
