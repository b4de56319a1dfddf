/*
 * Responsibility
 * - The request auth pipeline, in two layers:
 *   access  — resolve a Principal from the bearer token (never terminates)
 *   policy  — gate (method, path, principal) against the rule table (403)
 */
pub mod access;
pub mod policy;
