/// Only the ad's creator may change or remove it. Handlers check existence
/// first, so a non-owner probing an unknown id sees 404, never 403.
pub fn can_mutate(caller_id: i64, owner_id: i64) -> bool {
    caller_id == owner_id
}
