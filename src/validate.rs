// Input validation, run before any command is built

use crate::error::{BridgeError, BridgeResult};
use crate::models::{ActionKind, ActionRequest};
use crate::utils::{is_valid_date, is_valid_time};

/// Reject a request whose fields cannot produce a sensible command.
/// Empty fields count as "not supplied" and are checked per action.
pub fn validate_request(request: &ActionRequest) -> BridgeResult<()> {
    let fields = &request.fields;

    if !fields.date.is_empty() && !is_valid_date(&fields.date) {
        return Err(BridgeError::invalid(format!(
            "Invalid date, please use format \"YYYY-MM-DD\": {}",
            fields.date
        )));
    }
    for time in [&fields.start_time, &fields.stop_time] {
        if !time.is_empty() && !is_valid_time(time) {
            return Err(BridgeError::invalid(format!(
                "Invalid time, please use format \"HH:MM\": {}",
                time
            )));
        }
    }

    match request.kind {
        ActionKind::Modify if !fields.start_time.is_empty() && !fields.stop_time.is_empty() => {
            Err(BridgeError::invalid(
                "Can only change start or end time, clear one of the fields",
            ))
        }
        ActionKind::Modify if fields.start_time.is_empty() && fields.stop_time.is_empty() => {
            Err(BridgeError::invalid("Please enter a time"))
        }
        ActionKind::Start | ActionKind::Track if fields.description.trim().is_empty() => {
            Err(BridgeError::invalid("Task name can not be empty"))
        }
        ActionKind::Track if fields.start_time.is_empty() || fields.stop_time.is_empty() => {
            Err(BridgeError::invalid("Track needs both a start and a stop time"))
        }
        _ => Ok(()),
    }
}
