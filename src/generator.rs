use rand::Rng;
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::forest::Forest;
use crate::node::NodeId;

/// Builds random trees of a fixed size.
///
/// Starting at the root, every new node is attached to the current node; with
/// probability `branch_chance` the new node then becomes the current one. A
/// chance of 0 gives a flat star, a chance of 1 a single chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeGenerator {
    size: usize,
    branch_chance: f64,
}

impl TreeGenerator {
    pub fn new(size: usize, branch_chance: f64) -> TreeResult<Self> {
        if !(0.0..=1.0).contains(&branch_chance) {
            return Err(TreeError::InvalidArgument(format!(
                "branch chance must be within [0, 1], got {}",
                branch_chance
            )));
        }
        Ok(Self { size, branch_chance })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn branch_chance(&self) -> f64 {
        self.branch_chance
    }

    /// Generates one tree into `forest` and returns its root.
    ///
    /// `value` is called once per node in creation order. A size of 0 still
    /// yields a lone root.
    #[instrument(level = "debug", skip(forest, rng, value))]
    pub fn generate<A, R, F>(
        &self,
        forest: &mut Forest<A>,
        rng: &mut R,
        mut value: F,
    ) -> TreeResult<NodeId>
    where
        R: Rng,
        F: FnMut(&mut R) -> A,
    {
        let root = forest.create(value(&mut *rng));
        let mut current = root;
        for _ in 1..self.size {
            let child = forest.create(value(&mut *rng));
            forest.child_add(current, child)?;
            if rng.gen_bool(self.branch_chance) {
                current = child;
            }
        }
        debug!("generated tree of {} nodes at {}", self.size.max(1), root);
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn given_chance_out_of_range_when_created_then_invalid_argument(#[case] chance: f64) {
        assert!(matches!(
            TreeGenerator::new(10, chance),
            Err(TreeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn given_zero_chance_when_generated_then_flat_star() {
        let mut forest = Forest::new();
        let mut rng = StdRng::seed_from_u64(1);
        let root = TreeGenerator::new(6, 0.0)
            .unwrap()
            .generate(&mut forest, &mut rng, |_| ())
            .unwrap();

        assert_eq!(forest.children(root).unwrap().len(), 5);
    }

    #[test]
    fn given_full_chance_when_generated_then_single_chain() {
        let mut forest = Forest::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut counter = 0;
        let root = TreeGenerator::new(5, 1.0)
            .unwrap()
            .generate(&mut forest, &mut rng, |_| {
                counter += 1;
                counter
            })
            .unwrap();

        let mut depths = Vec::new();
        forest
            .for_each_depth_first(root, &mut depths, |d, depth, node| {
                d.push((depth, *node.value()))
            })
            .unwrap();
        assert_eq!(depths, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
    }

    #[test]
    fn given_size_zero_when_generated_then_lone_root() {
        let mut forest = Forest::new();
        let mut rng = StdRng::seed_from_u64(3);
        let root = TreeGenerator::new(0, 0.5)
            .unwrap()
            .generate(&mut forest, &mut rng, |_| 0u8)
            .unwrap();

        assert_eq!(forest.len(), 1);
        assert!(forest.is_root(root).unwrap());
    }
}
