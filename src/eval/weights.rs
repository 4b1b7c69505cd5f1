//! Stage-dependent feature weights for Hex evaluation
//!
//! The evaluator reads one of three constant weight sets, picked from how
//! full the board is. Openings reward central influence and free space,
//! endgames reward blocking and finished connection patterns.

/// Score of a decided game. Dominates every heuristic value.
pub const WIN_SCORE: i32 = 100_000_000;

/// Game phase selected by the occupancy ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Early,
    Mid,
    Late,
}

impl Stage {
    /// Early below 1/3 occupancy, mid below 2/3, late otherwise.
    pub fn from_progress(progress: f64) -> Self {
        if progress < 0.33 {
            Stage::Early
        } else if progress < 0.66 {
            Stage::Mid
        } else {
            Stage::Late
        }
    }

    pub fn weights(self) -> &'static EvalWeights {
        match self {
            Stage::Early => &EvalWeights::EARLY,
            Stage::Mid => &EvalWeights::MID,
            Stage::Late => &EvalWeights::LATE,
        }
    }

    /// Edge and interior templates only count once the board has filled up a bit.
    #[inline]
    pub fn uses_templates(self) -> bool {
        self != Stage::Early
    }
}

/// One weight set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalWeights {
    /// Own stone with a bridge (two empty carriers)
    pub bridge: i32,
    /// Subtracted per opponent stone holding a bridge
    pub block_opponent: i32,
    /// Stone flanked by two adjacent own stones in a wedge shape
    pub edge_template: i32,
    /// Stone anchoring a trapezoid/crescent/diamond pattern
    pub interior_template: i32,
    /// Multiplies the shortest connection distance (subtracted)
    pub free_spaces: i32,
    pub double_threat: i32,
    pub ladder: i32,
    /// Per own stone in the middle third of the board
    pub central_area: i32,
    /// Per own stone near a corner
    pub corner_area: i32,
    /// Subtracted per main diagonal the player is absent from
    pub diagonal_threat: i32,
    /// Applied to patterns pointing along the goal axis
    pub alignment_multiplier: f64,
    /// Added (negative) per empty neighbour off the goal axis
    pub misalignment_penalty: i32,
}

impl EvalWeights {
    pub const EARLY: EvalWeights = EvalWeights {
        bridge: 50,
        block_opponent: 20,
        edge_template: 10,
        interior_template: 20,
        free_spaces: 40,
        double_threat: 10,
        ladder: 15,
        central_area: 60,
        corner_area: 10,
        diagonal_threat: 20,
        alignment_multiplier: 1.5,
        misalignment_penalty: -10,
    };

    pub const MID: EvalWeights = EvalWeights {
        bridge: 60,
        block_opponent: 50,
        edge_template: 30,
        interior_template: 50,
        free_spaces: 30,
        double_threat: 40,
        ladder: 25,
        central_area: 40,
        corner_area: 15,
        diagonal_threat: 40,
        alignment_multiplier: 2.0,
        misalignment_penalty: -20,
    };

    pub const LATE: EvalWeights = EvalWeights {
        bridge: 70,
        block_opponent: 80,
        edge_template: 50,
        interior_template: 30,
        free_spaces: 20,
        double_threat: 60,
        ladder: 30,
        central_area: 20,
        corner_area: 20,
        diagonal_threat: 50,
        alignment_multiplier: 2.5,
        misalignment_penalty: -30,
    };

    /// `weight`, scaled by the alignment multiplier when `aligned`
    #[inline]
    pub fn scaled(&self, weight: i32, aligned: bool) -> i32 {
        if aligned {
            (weight as f64 * self.alignment_multiplier) as i32
        } else {
            weight
        }
    }
}
