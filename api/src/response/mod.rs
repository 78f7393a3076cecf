use serde::Serialize;

/// JSON envelope shared by every endpoint:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// ## Example (success):
/// ```json
/// {
///   "success": true,
///   "data": { "marks": 15, "max_marks": 20, "feedback": "Good work." },
///   "message": "Assignment evaluated successfully"
/// }
/// ```
///
/// ## Example (error):
/// ```json
/// {
///   "success": false,
///   "data": null,
///   "message": "Submission not found"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error responses carry `T::default()` as data; `()` serializes as `null`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}
