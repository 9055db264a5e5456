use crate::transition::*;

pub trait EmissionStrategy: for<'a> Strategy<EmissionContext<'a>> {}
impl<T> EmissionStrategy for T where T: for<'a> Strategy<EmissionContext<'a>> {}

#[derive(Clone, Copy, Debug)]
pub struct EmissionContext<'a> {
    /// The perpendicular distance (in meters) between the observation
    /// and its projected candidate position.
    pub distance: f64,

    /// The model parameters of the current request.
    pub parameters: &'a Parameters,
}

impl<'a> EmissionContext<'a> {
    pub fn new(distance: f64, parameters: &'a Parameters) -> Self {
        Self {
            distance,
            parameters,
        }
    }
}
