//! Read-only control catalog
//!
//! Versioned reference data for well-known compliance frameworks, currently
//! ISO 27001:2022 with its 14 Annex-A categories and a representative
//! control set. The catalog is pure data behind stateless query functions;
//! nothing here mutates, and a richer data source can replace the static
//! table behind the same query contract.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use utoipa::ToSchema;

use crate::model::{Control, ControlType, Criticality, FrameworkCategory};

/// A reference framework held by the catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogFramework {
    pub name: String,
    pub version: String,
    pub description: String,
    pub categories: Vec<CategoryInfo>,
    pub controls: Vec<Control>,
}

/// Category metadata without the derived control count.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Aggregate statistics over a catalog framework.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogStats {
    pub total_controls: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub by_criticality: BTreeMap<String, usize>,
}

/// Optional filters for control queries. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct ControlFilter {
    pub category: Option<String>,
    pub criticality: Option<Criticality>,
    pub control_type: Option<ControlType>,
    pub query: Option<String>,
}

/// List the names of all available reference frameworks.
pub fn available_framework_names() -> Vec<String> {
    CATALOG.iter().map(|f| f.name.clone()).collect()
}

/// Look up a framework by name.
///
/// Matching is case-insensitive and ignores spaces, so "iso 27001",
/// "ISO27001" and "ISO 27001:2022" all resolve to the same framework.
pub fn find_framework(name: &str) -> Option<&'static CatalogFramework> {
    let needle = name.trim().to_lowercase().replace(' ', "");
    if needle.is_empty() {
        return None;
    }
    CATALOG.iter().find(|f| {
        let haystack = f.name.to_lowercase().replace(' ', "");
        haystack.contains(&needle) || needle.contains(&haystack)
    })
}

/// Filter a framework's controls by category, criticality, type, and a
/// free-text keyword matched across id, title and description.
pub fn filter_controls<'a>(
    framework: &'a CatalogFramework,
    filter: &ControlFilter,
) -> Vec<&'a Control> {
    let query = filter.query.as_ref().map(|q| q.to_lowercase());

    framework
        .controls
        .iter()
        .filter(|c| {
            filter
                .category
                .as_ref()
                .is_none_or(|cat| c.category.eq_ignore_ascii_case(cat))
        })
        .filter(|c| filter.criticality.is_none_or(|cr| c.criticality == Some(cr)))
        .filter(|c| {
            filter
                .control_type
                .as_ref()
                .is_none_or(|t| c.control_type == *t)
        })
        .filter(|c| {
            query.as_ref().is_none_or(|q| {
                c.id.to_lowercase().contains(q)
                    || c.title.to_lowercase().contains(q)
                    || c.description.to_lowercase().contains(q)
            })
        })
        .collect()
}

/// Category detail with `control_count` recomputed from the control list.
pub fn category_detail(
    framework: &CatalogFramework,
    category_id: &str,
) -> Option<FrameworkCategory> {
    let info = framework
        .categories
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(category_id))?;

    let control_count = framework
        .controls
        .iter()
        .filter(|c| c.category.eq_ignore_ascii_case(category_id))
        .count();

    Some(FrameworkCategory {
        id: info.id.clone(),
        name: info.name.clone(),
        description: info.description.clone(),
        control_count,
    })
}

/// Decompose a dotted control id into up to three hierarchy levels,
/// shallowest first (e.g. `A.5.1.1` → `A.5`, `A.5.1`, `A.5.1.1`).
pub fn control_hierarchy(control_id: &str) -> Vec<String> {
    let segments: Vec<&str> = control_id.split('.').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Vec::new();
    }

    let mut levels = Vec::new();
    for depth in 2..=segments.len().min(4) {
        levels.push(segments[..depth].join("."));
    }
    if levels.is_empty() {
        levels.push(control_id.to_string());
    }
    levels
}

/// Expand a control's `related_controls` references into full controls.
/// Unknown references are skipped.
pub fn related_controls<'a>(
    framework: &'a CatalogFramework,
    control_id: &str,
) -> Vec<&'a Control> {
    let Some(control) = framework
        .controls
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(control_id))
    else {
        return Vec::new();
    };

    let Some(related) = &control.related_controls else {
        return Vec::new();
    };

    related
        .iter()
        .filter_map(|id| {
            framework
                .controls
                .iter()
                .find(|c| c.id.eq_ignore_ascii_case(id))
        })
        .collect()
}

/// Aggregate control counts grouped by category, type and criticality.
pub fn statistics(framework: &CatalogFramework) -> CatalogStats {
    let mut by_category = BTreeMap::new();
    let mut by_type = BTreeMap::new();
    let mut by_criticality = BTreeMap::new();

    for control in &framework.controls {
        *by_category.entry(control.category.clone()).or_insert(0) += 1;
        *by_type.entry(control.control_type.to_string()).or_insert(0) += 1;
        if let Some(criticality) = control.criticality {
            *by_criticality.entry(criticality.to_string()).or_insert(0) += 1;
        }
    }

    CatalogStats {
        total_controls: framework.controls.len(),
        by_category,
        by_type,
        by_criticality,
    }
}

// ── Reference data ──────────────────────────────────────────────────────────

static CATALOG: LazyLock<Vec<CatalogFramework>> = LazyLock::new(|| vec![iso_27001()]);

fn category(id: &str, name: &str, description: &str) -> CategoryInfo {
    CategoryInfo {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn control(
    id: &str,
    category: &str,
    title: &str,
    description: &str,
    control_type: ControlType,
    criticality: Criticality,
    related: &[&str],
    objectives: &[&str],
) -> Control {
    Control {
        id: id.to_string(),
        category: category.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        control_type,
        criticality: Some(criticality),
        related_controls: if related.is_empty() {
            None
        } else {
            Some(related.iter().map(|s| s.to_string()).collect())
        },
        objectives: if objectives.is_empty() {
            None
        } else {
            Some(objectives.iter().map(|s| s.to_string()).collect())
        },
    }
}

fn iso_27001() -> CatalogFramework {
    use ControlType::{Management, Operational, Technical};
    use Criticality::{Critical, High, Medium};

    CatalogFramework {
        name: "ISO 27001".to_string(),
        version: "2022".to_string(),
        description: "ISO/IEC 27001 information security management system requirements, \
                      Annex A reference controls"
            .to_string(),
        categories: vec![
            category("A.5", "Information Security Policies", "Management direction and support for information security"),
            category("A.6", "Organization of Information Security", "Internal organization and mobile/teleworking arrangements"),
            category("A.7", "Human Resource Security", "Security responsibilities before, during and after employment"),
            category("A.8", "Asset Management", "Identification and appropriate protection of organizational assets"),
            category("A.9", "Access Control", "Limiting access to information and information processing facilities"),
            category("A.10", "Cryptography", "Proper and effective use of cryptography"),
            category("A.11", "Physical and Environmental Security", "Preventing unauthorized physical access, damage and interference"),
            category("A.12", "Operations Security", "Correct and secure operation of information processing facilities"),
            category("A.13", "Communications Security", "Protection of information in networks"),
            category("A.14", "System Acquisition, Development and Maintenance", "Security as an integral part of information systems"),
            category("A.15", "Supplier Relationships", "Protection of assets accessible by suppliers"),
            category("A.16", "Information Security Incident Management", "Consistent and effective incident management"),
            category("A.17", "Business Continuity", "Information security continuity embedded in continuity management"),
            category("A.18", "Compliance", "Avoiding breaches of legal, statutory, regulatory or contractual obligations"),
        ],
        controls: vec![
            control("A.5.1.1", "A.5", "Policies for information security",
                "A set of policies for information security is defined, approved by management, published and communicated",
                Management, Critical, &["A.5.1.2", "A.18.1.1"],
                &["Provide management direction for information security"]),
            control("A.5.1.2", "A.5", "Review of the policies for information security",
                "Information security policies are reviewed at planned intervals or when significant changes occur",
                Management, High, &["A.5.1.1"], &[]),
            control("A.6.1.1", "A.6", "Information security roles and responsibilities",
                "All information security responsibilities are defined and allocated",
                Management, High, &["A.7.1.2"], &[]),
            control("A.6.1.2", "A.6", "Segregation of duties",
                "Conflicting duties and areas of responsibility are segregated to reduce opportunities for misuse",
                Operational, High, &[], &["Reduce risk of accidental or deliberate misuse"]),
            control("A.7.1.1", "A.7", "Screening",
                "Background verification checks on candidates are carried out proportional to business requirements",
                Operational, Medium, &[], &[]),
            control("A.7.1.2", "A.7", "Terms and conditions of employment",
                "Contractual agreements state employee and organization responsibilities for information security",
                Management, Medium, &["A.6.1.1"], &[]),
            control("A.8.1.1", "A.8", "Inventory of assets",
                "Assets associated with information and processing facilities are identified and inventoried",
                Operational, High, &["A.8.1.2"],
                &["Identify organizational assets and define protection responsibilities"]),
            control("A.8.1.2", "A.8", "Ownership of assets",
                "Assets maintained in the inventory are owned",
                Management, Medium, &["A.8.1.1"], &[]),
            control("A.8.2.1", "A.8", "Classification of information",
                "Information is classified in terms of legal requirements, value, criticality and sensitivity",
                Management, High, &[], &[]),
            control("A.9.1.1", "A.9", "Access control policy",
                "An access control policy is established, documented and reviewed based on business requirements",
                Management, Critical, &["A.9.2.1"],
                &["Limit access to information and processing facilities"]),
            control("A.9.2.1", "A.9", "User registration and de-registration",
                "A formal user registration and de-registration process enables assignment of access rights",
                Technical, Critical, &["A.9.1.1", "A.9.2.3"], &[]),
            control("A.9.2.3", "A.9", "Management of privileged access rights",
                "The allocation and use of privileged access rights is restricted and controlled",
                Technical, Critical, &["A.9.2.1"], &[]),
            control("A.9.4.1", "A.9", "Information access restriction",
                "Access to information and application system functions is restricted per the access control policy",
                Technical, High, &["A.9.1.1"], &[]),
            control("A.10.1.1", "A.10", "Policy on the use of cryptographic controls",
                "A policy on the use of cryptographic controls for protection of information is developed and implemented",
                Management, High, &["A.10.1.2"],
                &["Ensure proper and effective use of cryptography"]),
            control("A.10.1.2", "A.10", "Key management",
                "A policy on the use, protection and lifetime of cryptographic keys covers their whole lifecycle",
                Technical, Critical, &["A.10.1.1"], &[]),
            control("A.11.1.1", "A.11", "Physical security perimeter",
                "Security perimeters are defined and used to protect areas containing sensitive information",
                Operational, High, &["A.11.1.2"], &[]),
            control("A.11.1.2", "A.11", "Physical entry controls",
                "Secure areas are protected by appropriate entry controls so only authorized personnel gain access",
                Operational, High, &["A.11.1.1"], &[]),
            control("A.12.1.1", "A.12", "Documented operating procedures",
                "Operating procedures are documented and made available to all users who need them",
                Operational, Medium, &[], &[]),
            control("A.12.3.1", "A.12", "Information backup",
                "Backup copies of information, software and system images are taken and tested regularly",
                Technical, Critical, &["A.17.1.1"],
                &["Protect against loss of data"]),
            control("A.12.4.1", "A.12", "Event logging",
                "Event logs recording user activities, exceptions, faults and security events are produced and kept",
                Technical, High, &["A.12.4.3"], &[]),
            control("A.12.4.3", "A.12", "Administrator and operator logs",
                "System administrator and operator activities are logged, protected and regularly reviewed",
                Technical, High, &["A.12.4.1"], &[]),
            control("A.13.1.1", "A.13", "Network controls",
                "Networks are managed and controlled to protect information in systems and applications",
                Technical, High, &["A.13.2.1"], &[]),
            control("A.13.2.1", "A.13", "Information transfer policies and procedures",
                "Formal transfer policies, procedures and controls protect information transferred through communication facilities",
                Management, Medium, &["A.13.1.1"], &[]),
            control("A.14.2.1", "A.14", "Secure development policy",
                "Rules for the development of software and systems are established and applied to in-house development",
                Management, High, &[], &[]),
            control("A.15.1.1", "A.15", "Information security policy for supplier relationships",
                "Information security requirements for mitigating risks of supplier access to assets are agreed and documented",
                Management, Medium, &[], &[]),
            control("A.16.1.1", "A.16", "Responsibilities and procedures",
                "Management responsibilities and procedures ensure a quick, effective and orderly response to incidents",
                Management, Critical, &["A.16.1.4"],
                &["Ensure consistent and effective incident management"]),
            control("A.16.1.4", "A.16", "Assessment of and decision on information security events",
                "Information security events are assessed and it is decided whether they are classified as incidents",
                Operational, High, &["A.16.1.1"], &[]),
            control("A.17.1.1", "A.17", "Planning information security continuity",
                "Requirements for information security continuity in adverse situations are determined",
                Management, High, &["A.12.3.1"], &[]),
            control("A.18.1.1", "A.18", "Identification of applicable legislation and contractual requirements",
                "All relevant legislative, regulatory and contractual requirements are identified, documented and kept up to date",
                Management, High, &["A.5.1.1"], &[]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_lookup_is_forgiving() {
        assert!(find_framework("iso 27001").is_some());
        assert!(find_framework("ISO27001").is_some());
        assert!(find_framework("iso 27001:2022").is_some());
        assert!(find_framework("NIST CSF").is_none());
        assert!(find_framework("").is_none());
    }

    #[test]
    fn catalog_has_fourteen_categories() {
        let fw = find_framework("iso 27001").expect("catalog framework");
        assert_eq!(fw.categories.len(), 14);
        assert!(fw.controls.len() >= 27);
    }

    #[test]
    fn every_control_belongs_to_a_defined_category() {
        let fw = find_framework("iso 27001").expect("catalog framework");
        for control in &fw.controls {
            assert!(
                fw.categories.iter().any(|c| c.id == control.category),
                "control {} references undefined category {}",
                control.id,
                control.category
            );
        }
    }

    #[test]
    fn related_control_references_resolve() {
        let fw = find_framework("iso 27001").expect("catalog framework");
        for control in &fw.controls {
            for related in control.related_controls.iter().flatten() {
                assert!(
                    fw.controls.iter().any(|c| &c.id == related),
                    "control {} references unknown related control {}",
                    control.id,
                    related
                );
            }
        }
    }

    #[test]
    fn category_detail_recomputes_count() {
        let fw = find_framework("iso 27001").expect("catalog framework");
        let detail = category_detail(fw, "A.9").expect("A.9 exists");
        let expected = fw.controls.iter().filter(|c| c.category == "A.9").count();
        assert_eq!(detail.control_count, expected);
        assert!(detail.control_count > 0);
        assert!(category_detail(fw, "A.99").is_none());
    }

    #[test]
    fn filters_compose() {
        let fw = find_framework("iso 27001").expect("catalog framework");

        let technical = filter_controls(
            fw,
            &ControlFilter {
                control_type: Some(ControlType::Technical),
                ..ControlFilter::default()
            },
        );
        assert!(!technical.is_empty());
        assert!(technical.iter().all(|c| c.control_type == ControlType::Technical));

        let critical_a9 = filter_controls(
            fw,
            &ControlFilter {
                category: Some("A.9".to_string()),
                criticality: Some(Criticality::Critical),
                ..ControlFilter::default()
            },
        );
        assert!(critical_a9.iter().all(|c| c.category == "A.9"));
        assert!(critical_a9
            .iter()
            .all(|c| c.criticality == Some(Criticality::Critical)));
    }

    #[test]
    fn keyword_search_spans_id_title_description() {
        let fw = find_framework("iso 27001").expect("catalog framework");

        let by_title = filter_controls(
            fw,
            &ControlFilter {
                query: Some("cryptographic".to_string()),
                ..ControlFilter::default()
            },
        );
        assert!(by_title.iter().any(|c| c.id == "A.10.1.1"));

        let by_id = filter_controls(
            fw,
            &ControlFilter {
                query: Some("a.12.3".to_string()),
                ..ControlFilter::default()
            },
        );
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, "A.12.3.1");
    }

    #[test]
    fn hierarchy_decomposes_up_to_three_levels() {
        assert_eq!(
            control_hierarchy("A.5.1.1"),
            vec!["A.5".to_string(), "A.5.1".to_string(), "A.5.1.1".to_string()]
        );
        assert_eq!(
            control_hierarchy("A.5.1"),
            vec!["A.5".to_string(), "A.5.1".to_string()]
        );
        assert_eq!(control_hierarchy("CC6"), vec!["CC6".to_string()]);
        assert!(control_hierarchy("").is_empty());
    }

    #[test]
    fn related_expansion_resolves_full_controls() {
        let fw = find_framework("iso 27001").expect("catalog framework");
        let related = related_controls(fw, "A.10.1.2");
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, "A.10.1.1");
        assert!(related_controls(fw, "NOPE").is_empty());
    }

    #[test]
    fn statistics_account_for_every_control() {
        let fw = find_framework("iso 27001").expect("catalog framework");
        let stats = statistics(fw);
        assert_eq!(stats.total_controls, fw.controls.len());
        assert_eq!(stats.by_category.values().sum::<usize>(), fw.controls.len());
        assert_eq!(stats.by_type.values().sum::<usize>(), fw.controls.len());
        assert_eq!(stats.by_category.len(), 14);
    }
}
