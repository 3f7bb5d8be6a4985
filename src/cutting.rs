//! Rod cutting by dynamic programming.
//!
//! Splits a rod of integer length into pieces so that the summed piece
//! prices are maximal. Two equivalent solvers are provided: top-down
//! recursion with memoization, and bottom-up tabulation.
//!
//! Both solvers try first cuts in ascending length and keep the first
//! strictly better profit, so among equally profitable cuttings the one
//! with the shortest leading piece wins. Both therefore return identical
//! plans for identical input.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 15.1 (Rod Cutting)

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Result of a rod cutting run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutPlan {
    /// Best achievable total price.
    pub max_profit: u64,
    /// Piece lengths, sorted ascending.
    pub cuts: Vec<usize>,
    /// Number of cuts made (pieces - 1, or 0 for an empty rod).
    pub number_of_cuts: usize,
}

impl CutPlan {
    fn from_first_cuts(max_profit: u64, length: usize, first_cut: impl Fn(usize) -> usize) -> Self {
        let mut cuts = Vec::new();
        let mut remaining = length;
        while remaining > 0 {
            let cut = first_cut(remaining);
            cuts.push(cut);
            remaining -= cut;
        }
        cuts.sort_unstable();

        Self {
            max_profit,
            number_of_cuts: cuts.len().saturating_sub(1),
            cuts,
        }
    }

    /// Number of pieces.
    pub fn piece_count(&self) -> usize {
        self.cuts.len()
    }
}

/// Rod cutting solver over a fixed price table.
///
/// # Example
///
/// ```
/// use u_batch::cutting::RodCutting;
///
/// let solver = RodCutting::new(vec![1, 5, 8, 9, 10, 17, 17, 20]);
/// let plan = solver.tabulated(8).unwrap();
/// assert_eq!(plan.max_profit, 22);
/// assert_eq!(plan.cuts, vec![2, 6]);
/// assert_eq!(plan.number_of_cuts, 1);
/// ```
#[derive(Debug, Clone)]
pub struct RodCutting {
    prices: Vec<u64>,
}

impl RodCutting {
    /// Creates a solver. `prices[i]` is the price of a piece of length `i + 1`.
    pub fn new(prices: Vec<u64>) -> Self {
        Self { prices }
    }

    /// The price table.
    pub fn prices(&self) -> &[u64] {
        &self.prices
    }

    /// Solves top-down with a memo table of `(best_profit, first_cut)`.
    ///
    /// Recursion depth equals `length`, so very long rods (on the order of
    /// 10^5) can exhaust the thread stack. Use [`tabulated`](Self::tabulated)
    /// for those.
    pub fn memoized(&self, length: usize) -> Result<CutPlan> {
        self.check_length(length)?;

        let mut memo: Vec<Option<(u64, usize)>> = vec![None; length + 1];
        let max_profit = self.solve(length, &mut memo);

        Ok(CutPlan::from_first_cuts(max_profit, length, |n| {
            memo[n].map_or(n, |(_, cut)| cut)
        }))
    }

    /// Solves bottom-up, filling profits for every length up to `length`.
    pub fn tabulated(&self, length: usize) -> Result<CutPlan> {
        self.check_length(length)?;

        let mut best = vec![0u64; length + 1];
        let mut first_cuts = vec![0usize; length + 1];

        for j in 1..=length {
            let mut best_here: Option<u64> = None;
            for i in 1..=j {
                let profit = self.prices[i - 1] + best[j - i];
                if best_here.is_none_or(|b| profit > b) {
                    best_here = Some(profit);
                    first_cuts[j] = i;
                }
            }
            best[j] = best_here.unwrap_or(0);
        }

        Ok(CutPlan::from_first_cuts(best[length], length, |n| first_cuts[n]))
    }

    fn solve(&self, n: usize, memo: &mut [Option<(u64, usize)>]) -> u64 {
        if n == 0 {
            return 0;
        }
        if let Some((profit, _)) = memo[n] {
            return profit;
        }

        let mut best: Option<(u64, usize)> = None;
        for i in 1..=n {
            let profit = self.prices[i - 1] + self.solve(n - i, memo);
            if best.is_none_or(|(b, _)| profit > b) {
                best = Some((profit, i));
            }
        }

        memo[n] = best;
        best.map_or(0, |(profit, _)| profit)
    }

    fn check_length(&self, length: usize) -> Result<()> {
        if length > self.prices.len() {
            return Err(Error::PriceTableTooShort {
                length,
                available: self.prices.len(),
            });
        }
        Ok(())
    }
}
