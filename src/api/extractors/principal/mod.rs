/*!
 * Authenticated principal extractor
 *
 * Responsibility:
 * - hand the gate's Principal to handlers
 * - the gate middleware must run first; it is the one that validates
 */

mod core;

pub use core::CurrentPrincipal;
