use crate::fault::FaultProximityResolver;

pub struct AppState {
    pub resolver: FaultProximityResolver,
}
