use crate::errors::AppError;
use crate::models::application::ApplicationStatus;

/// Outcome of asking for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed(ApplicationStatus),
    Unchanged,
}

/// `Rejected` and `Hired` are final; everything else may move freely.
pub fn transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<Transition, AppError> {
    if from == to {
        return Ok(Transition::Unchanged);
    }
    if from.is_terminal() {
        return Err(AppError::UnprocessableEntity(format!(
            "Application is already {}; it cannot move to {}",
            from.as_str(),
            to.as_str()
        )));
    }
    Ok(Transition::Changed(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    #[test]
    fn test_open_statuses_move_anywhere() {
        for from in [Pending, Reviewed, Shortlisted] {
            for to in ApplicationStatus::ALL {
                assert!(transition(from, to).is_ok(), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn test_terminal_statuses_are_final() {
        for from in [Rejected, Hired] {
            for to in ApplicationStatus::ALL.into_iter().filter(|s| *s != from) {
                assert!(matches!(
                    transition(from, to),
                    Err(AppError::UnprocessableEntity(_))
                ));
            }
        }
    }

    #[test]
    fn test_same_status_is_noop() {
        assert_eq!(transition(Hired, Hired).unwrap(), Transition::Unchanged);
        assert_eq!(transition(Pending, Pending).unwrap(), Transition::Unchanged);
        assert_eq!(
            transition(Pending, Shortlisted).unwrap(),
            Transition::Changed(Shortlisted)
        );
    }
}
