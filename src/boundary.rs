use std::fmt;

use crate::coordinator::ComputedVersion;
use crate::git::DETACHED_HEAD;

/// Warnings about the checkout that still let a version be reported.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The checkout does not follow any branch
    UntrackedCheckout,
    /// No known branch could be matched to the tracking branch
    NoActiveBranch {
        tracking_branch: String,
        sentinel: String,
    },
}

impl BoundaryWarning {
    /// Collects the warnings that apply to a computed version.
    pub fn for_result(result: &ComputedVersion) -> Vec<BoundaryWarning> {
        let mut warnings = Vec::new();

        if result.tracking_branch == DETACHED_HEAD {
            warnings.push(BoundaryWarning::UntrackedCheckout);
        }

        if result.is_unknown() {
            warnings.push(BoundaryWarning::NoActiveBranch {
                tracking_branch: result.tracking_branch.clone(),
                sentinel: result.version.clone(),
            });
        }

        warnings
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UntrackedCheckout => {
                write!(f, "Checkout is not tracking a remote branch")
            }
            BoundaryWarning::NoActiveBranch {
                tracking_branch,
                sentinel,
            } => {
                write!(
                    f,
                    "No known branch matches '{}', reporting version '{}'",
                    tracking_branch, sentinel
                )
            }
        }
    }
}
