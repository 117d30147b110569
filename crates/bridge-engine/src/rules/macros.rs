/// Declares a unit struct implementing [`Rule`](crate::rules::Rule).
///
/// ```ignore
/// bidding_rule! {
///     struct StrongTwoClubs;
///     name: "Strong 2C",
///     description: "23+ HCP, artificial and forcing",
///     propose: |s| {
///         (s.hcp() >= 23).then_some(Call::bid(2, Strain::Clubs))
///     }
/// }
/// ```
#[macro_export]
macro_rules! bidding_rule {
    (
        $(#[$meta:meta])*
        struct $struct_name:ident;
        name: $name:literal,
        description: $description:literal,
        propose: |$s:ident| $body:block $(,)?
    ) => {
        $(#[$meta])*
        pub struct $struct_name;

        impl $crate::rules::Rule for $struct_name {
            fn name(&self) -> &'static str {
                $name
            }

            fn description(&self) -> &'static str {
                $description
            }

            fn propose(
                &self,
                $s: &$crate::situation::Situation<'_>,
            ) -> Option<bridge_core::Call> $body
        }
    };
}
