
#[cfg(test)]
mod encounter_flow_tests;
#[cfg(test)]
mod recording_tests;
