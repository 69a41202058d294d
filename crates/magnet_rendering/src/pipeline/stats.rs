//! Rendering statistics.

/// Statistics from a render frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of backend calls.
    pub draw_calls: u32,
    /// Instances submitted, including culled slots on the procedural path.
    pub instances: usize,
    /// Bytes handed to the backend.
    pub bytes_uploaded: usize,
}

impl RenderStats {
    /// Returns true if draw calls are under `budget`.
    #[must_use]
    pub const fn draw_calls_ok(&self, budget: u32) -> bool {
        self.draw_calls < budget
    }

    /// Average instances per call.
    #[must_use]
    pub fn instances_per_call(&self) -> f32 {
        if self.draw_calls > 0 {
            self.instances as f32 / self.draw_calls as f32
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instances_per_call() {
        let stats = RenderStats {
            draw_calls: 4,
            instances: 2000,
            bytes_uploaded: 0,
        };
        assert!((stats.instances_per_call() - 500.0).abs() < f32::EPSILON);
        assert!(stats.draw_calls_ok(1000));
        let empty = RenderStats::default();
        assert!(empty.instances_per_call().abs() < f32::EPSILON);
    }
}
