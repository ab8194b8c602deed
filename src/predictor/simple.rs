
use crate::branch::Outcome;
use crate::predictor::SimplePredictor;

/// A baseline predictor with no state: always guess the same outcome.
pub struct StaticPredictor(pub Outcome);
impl SimplePredictor for StaticPredictor {
    fn name(&self) -> &'static str {
        match self.0 {
            Outcome::T => "AlwaysTaken",
            Outcome::N => "AlwaysNotTaken",
        }
    }
    fn predict(&self) -> Outcome { self.0 }
}

/// A baseline predictor with no state: guess at random.
pub struct RandomPredictor;
impl SimplePredictor for RandomPredictor {
    fn name(&self) -> &'static str { "Random" }
    fn predict(&self) -> Outcome { rand::random::<bool>().into() }
}

