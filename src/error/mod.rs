/**
 * Error Module
 *
 * Defines the error taxonomy used across the backend and its conversion
 * into HTTP responses.
 *
 * # Error Categories
 *
 * - `Validation` - missing or malformed input (400)
 * - `Conflict` - duplicate email, lost update race (409)
 * - `Auth` - bad credentials or invalid session token (401)
 * - `NotFound` - unresolvable board or user identifier (404)
 * - `Upstream` - document store or media host failure (500)
 *
 * Handlers and services return `ApiError` and branch on the variant,
 * never on message substrings.
 */

pub mod conversion;
pub mod types;

pub use types::ApiError;
