use crate::{bitmap::Bitmap, Branch, DdSpec, Step};

/// Solver that iteratively returns the accepted paths of a decision diagram
/// specification.
///
/// The diagram is walked depth first without sharing any nodes, so every
/// accepted path is produced exactly once. Each path is the list of levels
/// taken along it, highest first.
#[derive(Debug)]
pub struct Solver<'s, S: DdSpec> {
    spec: &'s S,

    // Values used to track the state of solving
    taken: Vec<usize>,
    stack: Vec<Frame>,
    root_accepted: bool,
}

#[derive(Debug)]
enum FrameState {
    // Before trying to place a piece at this level
    Take,
    // After the take subtree, before trying to leave the cell empty
    Skip,
    // Both branches explored
    Exhausted,
}

#[derive(Debug)]
struct Frame {
    state: Box<[Bitmap]>,
    level: usize,
    next: FrameState,
}

impl<'s, S> Solver<'s, S>
where
    S: DdSpec,
{
    /// Create a new `Solver` for the given specification.
    pub fn new(spec: &'s S) -> Self {
        let mut solver = Self {
            spec,

            taken: Vec::new(),
            stack: Vec::new(),
            root_accepted: false,
        };
        solver.push_root();

        solver
    }

    /// Reset all solver state, starting over from the root.
    pub fn reset(&mut self) {
        self.taken.clear();
        self.stack.clear();
        self.root_accepted = false;
        self.push_root();
    }

    fn push_root(&mut self) {
        let mut state = vec![0; self.spec.array_size()].into_boxed_slice();

        match self.spec.root(&mut state) {
            Step::Level(level) => {
                log::debug!("Starting search from root level [{}].", level);
                self.stack.push(Frame {
                    state,
                    level,
                    next: FrameState::Take,
                });
            }
            Step::Accept => self.root_accepted = true,
            Step::Reject => {}
        }
    }

    /// Return all accepted paths.
    pub fn all_solutions(&mut self) -> Vec<Vec<usize>> {
        self.collect()
    }

    /// Compute up to the next accepted path, returning `None` if there are no
    /// more.
    pub fn next_solution(&mut self) -> Option<Vec<usize>> {
        if self.root_accepted {
            self.root_accepted = false;
            return Some(Vec::new());
        }

        while let Some(frame) = self.stack.last_mut() {
            let branch = match frame.next {
                FrameState::Take => {
                    frame.next = FrameState::Skip;
                    self.taken.push(frame.level);
                    Branch::Take
                }
                FrameState::Skip => {
                    frame.next = FrameState::Exhausted;
                    self.taken.pop();
                    Branch::Skip
                }
                FrameState::Exhausted => {
                    self.stack.pop();
                    continue;
                }
            };

            let level = frame.level;
            let mut state = frame.state.clone();

            match self.spec.child(&mut state, level, branch) {
                Step::Reject => {}
                Step::Accept => {
                    log::trace!("Accepted path {:?}.", self.taken);
                    return Some(self.taken.clone());
                }
                Step::Level(next) => {
                    debug_assert!(next < level);
                    self.stack.push(Frame {
                        state,
                        level: next,
                        next: FrameState::Take,
                    });
                }
            }
        }

        None
    }
}

impl<'s, S> Iterator for Solver<'s, S>
where
    S: DdSpec,
{
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution()
    }
}
