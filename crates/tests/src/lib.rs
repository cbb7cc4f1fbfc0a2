#[cfg(test)]
mod common;

#[cfg(test)]
mod disputes_tests;

#[cfg(test)]
mod bulk_tests;

#[cfg(test)]
mod session_tests;

#[cfg(test)]
mod export_tests;

#[cfg(test)]
mod envelope_tests;
