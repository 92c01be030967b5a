//! Behavioural tests of the property contract, across property types.
