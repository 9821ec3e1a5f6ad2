//! Error types for ledgerbook-core
//!
//! Structural errors abort a derivation. Unbalanced ledgers are not errors:
//! they are reported as data on the statement results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AccountRole, Category};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnknownAccount,
    DuplicateAccount,
    DuplicateTransaction,
    CyclicHierarchy,
    RoleMismatch,
    UnknownTaxCode,
    DuplicateTaxCode,
    InvalidCategory,
    InvalidRole,
    ValidationError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::UnknownAccount => write!(f, "UNKNOWN_ACCOUNT"),
            ErrorCode::DuplicateAccount => write!(f, "DUPLICATE_ACCOUNT"),
            ErrorCode::DuplicateTransaction => write!(f, "DUPLICATE_TRANSACTION"),
            ErrorCode::CyclicHierarchy => write!(f, "CYCLIC_HIERARCHY"),
            ErrorCode::RoleMismatch => write!(f, "ROLE_MISMATCH"),
            ErrorCode::UnknownTaxCode => write!(f, "UNKNOWN_TAX_CODE"),
            ErrorCode::DuplicateTaxCode => write!(f, "DUPLICATE_TAX_CODE"),
            ErrorCode::InvalidCategory => write!(f, "INVALID_CATEGORY"),
            ErrorCode::InvalidRole => write!(f, "INVALID_ROLE"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Detailed error information for callers that render errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for ledgerbook-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Transaction {transaction_id} references unknown account {account_id}")]
    UnknownAccount {
        transaction_id: String,
        account_id: String,
    },

    #[error("Duplicate account id: {id}")]
    DuplicateAccount { id: String },

    #[error("Duplicate transaction id: {id}")]
    DuplicateTransaction { id: String },

    #[error("Account hierarchy contains a cycle through account {account_id}")]
    CyclicHierarchy { account_id: String },

    #[error("Account {account_id} has role {role}, which is not valid for category {category}")]
    RoleMismatch {
        account_id: String,
        role: AccountRole,
        category: Category,
    },

    #[error("Document {document_id} references unknown tax code {tax_code_id}")]
    UnknownTaxCode {
        document_id: String,
        tax_code_id: String,
    },

    #[error("Duplicate tax code id: {id}")]
    DuplicateTaxCode { id: String },

    #[error("Account {account_id} has invalid category '{value}'")]
    InvalidCategory { account_id: String, value: String },

    #[error("Account {account_id} has invalid role '{value}'")]
    InvalidRole { account_id: String, value: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::UnknownAccount { .. } => ErrorCode::UnknownAccount,
            CoreError::DuplicateAccount { .. } => ErrorCode::DuplicateAccount,
            CoreError::DuplicateTransaction { .. } => ErrorCode::DuplicateTransaction,
            CoreError::CyclicHierarchy { .. } => ErrorCode::CyclicHierarchy,
            CoreError::RoleMismatch { .. } => ErrorCode::RoleMismatch,
            CoreError::UnknownTaxCode { .. } => ErrorCode::UnknownTaxCode,
            CoreError::DuplicateTaxCode { .. } => ErrorCode::DuplicateTaxCode,
            CoreError::InvalidCategory { .. } => ErrorCode::InvalidCategory,
            CoreError::InvalidRole { .. } => ErrorCode::InvalidRole,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::InvalidCategory { .. } | CoreError::InvalidRole { .. } => {
                ErrorSeverity::Error
            }
            // referential integrity is broken upstream
            _ => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::UnknownAccount {
                transaction_id,
                account_id,
            } => details
                .with_detail(serde_json::json!({
                    "transaction_id": transaction_id,
                    "account_id": account_id,
                }))
                .with_suggestion(format!(
                    "Add account '{}' to the chart of accounts or repost the transaction.",
                    account_id
                )),
            CoreError::CyclicHierarchy { account_id } => details.with_suggestion(format!(
                "Clear or change the parent of account '{}'.",
                account_id
            )),
            CoreError::RoleMismatch { role, .. } => {
                let hint = match role.required_category() {
                    Some(category) => format!("Role '{}' requires category '{}'.", role, category),
                    None => format!("Role '{}' is valid for any category.", role),
                };
                details.with_suggestion(hint)
            }
            CoreError::UnknownTaxCode { tax_code_id, .. } => details.with_suggestion(format!(
                "Define tax code '{}' or remove it from the line.",
                tax_code_id
            )),
            CoreError::InvalidCategory { .. } => details.with_suggestion(
                "Use one of: asset, liability, equity, income, expense.".to_string(),
            ),
            CoreError::InvalidRole { .. } => details.with_suggestion(
                "Use one of: cash, receivable, inventory, prepayment, accumulated_depreciation, \
                 payable, cost_of_goods_sold, depreciation_amortization, other."
                    .to_string(),
            ),
            _ => details,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::UnknownAccount.to_string(), "UNKNOWN_ACCOUNT");
        assert_eq!(ErrorCode::CyclicHierarchy.to_string(), "CYCLIC_HIERARCHY");
    }

    #[test]
    fn test_structural_errors_are_critical() {
        let error = CoreError::UnknownAccount {
            transaction_id: "t1".to_string(),
            account_id: "99".to_string(),
        };
        assert_eq!(error.code(), ErrorCode::UnknownAccount);
        assert_eq!(error.severity(), ErrorSeverity::Critical);

        let error = CoreError::ValidationError {
            message: "empty".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_unknown_account_details() {
        let error = CoreError::UnknownAccount {
            transaction_id: "t1".to_string(),
            account_id: "99".to_string(),
        };
        let details = error.to_details();
        assert!(details.message.contains("99"));
        assert_eq!(details.details.unwrap()["transaction_id"], "t1");
        assert_eq!(details.suggestions.len(), 1);
    }

    #[test]
    fn test_role_mismatch_suggestion() {
        let error = CoreError::RoleMismatch {
            account_id: "5".to_string(),
            role: AccountRole::Payable,
            category: Category::Asset,
        };
        let rendered = error.to_details().to_string();
        assert!(rendered.contains("ROLE_MISMATCH"));
        assert!(rendered.contains("requires category 'liability'"));
    }
}
