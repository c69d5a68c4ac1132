/// Builds a [`PluginRegistryManifest`](crate::PluginRegistryManifest) from its fields.
///
/// The six identity fields are required and come first; the rest are optional but must
/// keep this order.
#[macro_export]
macro_rules! plugin_manifest {
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $description:expr,
        author: $author:expr,
        placement: $placement:expr
        $(, category: $category:expr)?
        $(, screen: $screen:expr)?
        $(, permissions: [$($perm:expr),* $(,)?])?
        $(, homepage: $homepage:expr)?
        $(, license: $license:expr)?
        $(, route: ($route:expr, $menu:expr))?
        $(, compatibility: ($min:expr $(, $max:expr)?))?
        $(,)?
    ) => {
        $crate::PluginRegistryManifest::new($id, $name, $version, $description, $author, $placement)
            $(.with_category($category))?
            $(.with_screen($screen))?
            $($(.with_permission($perm))*)?
            $(.with_homepage($homepage))?
            $(.with_license($license))?
            $(.with_route($route, $menu))?
            $(.with_compatibility($min, $crate::plugin_manifest!(@opt $($max)?)))?
    };

    (@opt) => { None };
    (@opt $val:expr) => { Some($val) };
}

/// Builds the [`PluginManifest`](crate::PluginManifest) a plugin ships to the host.
#[macro_export]
macro_rules! host_manifest {
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $description:expr,
        author: $author:expr,
        placement: $placement:expr,
        permissions: [$($perm:expr),* $(,)?]
        $(, category: $category:expr)?
        $(, screen: $screen:expr)?
        $(, keywords: [$($keyword:expr),* $(,)?])?
        $(, config: $config:expr)?
        $(,)?
    ) => {
        $crate::PluginManifest {
            id: $id.to_string(),
            name: $name.to_string(),
            version: $version.to_string(),
            description: $description.to_string(),
            author: $author.to_string(),
            license: None,
            homepage: None,
            repository: None,
            placement: $placement,
            screen: $crate::plugin_manifest!(@opt $($screen)?),
            permissions: vec![$($perm),*],
            config: $crate::plugin_manifest!(@opt $($config)?),
            ui: None,
            dependencies: None,
            keywords: $crate::plugin_manifest!(@opt $(vec![$($keyword.to_string()),*])?),
            category: $crate::plugin_manifest!(@opt $($category)?),
        }
    };
}
