//! Table-driven document scan.
//!
//! One [`FieldSpec`] per raw field a country's payslips can carry: the raw
//! key the mapper understands, a line regex, and the document-AI entity
//! types that may hold the same value. [`scan_document`] runs every spec
//! through the hybrid fallback chain and normalizes the result into a
//! canonical record.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::mapping::{RawFields, normalize_raw_fields};
use crate::models::{Country, ExtractionMethod, PayslipExtracted};

use super::hybrid::{Entity, FieldSource, employer_near_tax_id, extract_field};
use super::money::{MoneyFormat, parse_money};

/// How to locate one raw field in a document.
#[derive(Debug)]
pub struct FieldSpec {
    /// Raw key understood by the country's alias table.
    pub raw_key: &'static str,
    /// Line pattern; capture group 1 is the value.
    pub pattern: &'static str,
    /// Entity-type substrings, in priority order.
    pub entity_types: &'static [&'static str],
    /// Monetary values are validated by the currency cleaner on extraction.
    pub monetary: bool,
}

struct CompiledSpec {
    spec: &'static FieldSpec,
    pattern: Regex,
}

fn compile(specs: &'static [FieldSpec]) -> Vec<CompiledSpec> {
    specs
        .iter()
        .map(|spec| CompiledSpec {
            spec,
            pattern: Regex::new(spec.pattern).expect("invalid field pattern"),
        })
        .collect()
}

fn compiled_specs(country: Country) -> &'static [CompiledSpec] {
    static BRAZIL: OnceLock<Vec<CompiledSpec>> = OnceLock::new();
    static PORTUGAL: OnceLock<Vec<CompiledSpec>> = OnceLock::new();
    static FRANCE: OnceLock<Vec<CompiledSpec>> = OnceLock::new();
    match country {
        Country::Brazil => BRAZIL.get_or_init(|| compile(BRAZIL_SPECS)),
        Country::Portugal => PORTUGAL.get_or_init(|| compile(PORTUGAL_SPECS)),
        Country::France => FRANCE.get_or_init(|| compile(FRANCE_SPECS)),
    }
}

/// Employer tax-id line pattern, for the positional employer heuristic.
fn tax_id_pattern(country: Country) -> &'static Regex {
    static BRAZIL: OnceLock<Regex> = OnceLock::new();
    static PORTUGAL: OnceLock<Regex> = OnceLock::new();
    static FRANCE: OnceLock<Regex> = OnceLock::new();
    match country {
        Country::Brazil => BRAZIL
            .get_or_init(|| Regex::new(r"\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}").expect("invalid regex")),
        Country::Portugal => PORTUGAL
            .get_or_init(|| Regex::new(r"(?i)\b(?:NIPC|NIF)\b\s*:?\s*\d{9}").expect("invalid regex")),
        Country::France => FRANCE
            .get_or_init(|| Regex::new(r"(?i)\bSIRET\b\s*:?\s*[\d ]{14,20}").expect("invalid regex")),
    }
}

/// Raw key the employer-name heuristic writes to, per country.
fn employer_key(country: Country) -> &'static str {
    match country {
        Country::Brazil => "empresa",
        Country::Portugal => "entidade_patronal",
        Country::France => "employeur",
    }
}

/// Runs every field spec for `country` over the document.
///
/// Returns the raw field map (values still in the source locale — coercion
/// belongs to the normalizer) and the overall extraction method: `regex`
/// when the text supplied every hit, `entity` when the entity list did,
/// `hybrid` for a mix or when the positional heuristic fired.
pub fn extract_raw_fields(
    text: &str,
    entities: &[Entity],
    country: Country,
) -> (RawFields, ExtractionMethod) {
    let lines: Vec<&str> = text.lines().collect();
    let format = MoneyFormat::for_country(country);
    let money_cleaner = |s: &str| parse_money(s, format).map(|_| s.trim().to_string());

    let mut raw = RawFields::new();
    let mut sources: HashMap<FieldSource, usize> = HashMap::new();

    for compiled in compiled_specs(country) {
        let cleaner: Option<&dyn Fn(&str) -> Option<String>> = if compiled.spec.monetary {
            Some(&money_cleaner)
        } else {
            None
        };
        let Some(hit) = extract_field(
            &lines,
            &compiled.pattern,
            compiled.spec.entity_types,
            entities,
            cleaner,
        ) else {
            continue;
        };
        *sources.entry(hit.source).or_default() += 1;
        raw.insert(compiled.spec.raw_key.to_string(), Value::String(hit.value));
    }

    // Employer name is important enough for a last-resort positional guess.
    let employer = employer_key(country);
    if !raw.contains_key(employer) {
        if let Some(name) = employer_near_tax_id(&lines, tax_id_pattern(country)) {
            debug!(employer = %name, "employer name recovered by tax-id adjacency");
            *sources.entry(FieldSource::Heuristic).or_default() += 1;
            raw.insert(employer.to_string(), Value::String(name));
        }
    }

    let regex_hits = sources.get(&FieldSource::Regex).copied().unwrap_or(0);
    let entity_hits = sources.get(&FieldSource::Entity).copied().unwrap_or(0);
    let heuristic_hits = sources.get(&FieldSource::Heuristic).copied().unwrap_or(0);
    let method = match (regex_hits, entity_hits, heuristic_hits) {
        (r, 0, 0) if r > 0 => ExtractionMethod::Regex,
        (0, e, 0) if e > 0 => ExtractionMethod::Entity,
        _ => ExtractionMethod::Hybrid,
    };

    (raw, method)
}

/// Full scan pipeline: hybrid extraction, then normalization onto the
/// canonical record, with the extraction method stamped in.
pub fn scan_document(text: &str, entities: &[Entity], country: Country) -> PayslipExtracted {
    let (raw, method) = extract_raw_fields(text, entities, country);
    let mut record = normalize_raw_fields(&raw, country);
    record.method = method;
    record
}

const BRAZIL_SPECS: &[FieldSpec] = &[
    FieldSpec {
        raw_key: "salario_bruto",
        pattern: r"(?i)sal[áa]rio\s+bruto\s*:?\s*(?:R\$\s*)?([0-9][0-9.,]*)",
        entity_types: &["gross_amount", "gross_salary", "bruto"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "salario_base",
        pattern: r"(?i)sal[áa]rio\s+base\s*:?\s*(?:R\$\s*)?([0-9][0-9.,]*)",
        entity_types: &["base_salary"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "salario_liquido",
        pattern: r"(?i)(?:sal[áa]rio\s+|total\s+)?l[íi]quido(?:\s+a\s+receber)?\s*:?\s*(?:R\$\s*)?([0-9][0-9.,]*)",
        entity_types: &["net_amount", "net_salary", "liquido"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "total_vencimentos",
        pattern: r"(?i)total\s+(?:de\s+)?vencimentos\s*:?\s*(?:R\$\s*)?([0-9][0-9.,]*)",
        entity_types: &["total_earnings", "gross_total"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "total_descontos",
        pattern: r"(?i)total\s+(?:de\s+)?descontos\s*:?\s*(?:R\$\s*)?([0-9][0-9.,]*)",
        entity_types: &["total_deductions", "deductions_total"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "inss",
        pattern: r"(?i)\bINSS\b[^0-9]*([0-9][0-9.,]*)",
        entity_types: &["social_security", "inss"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "irrf",
        pattern: r"(?i)\bIRRF\b[^0-9]*([0-9][0-9.,]*)",
        entity_types: &["income_tax", "irrf"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "base_fgts",
        pattern: r"(?i)base\s+(?:de\s+c[áa]lculo\s+)?FGTS\s*:?\s*(?:R\$\s*)?([0-9][0-9.,]*)",
        entity_types: &["fgts_base"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "fgts",
        pattern: r"(?i)\bFGTS\b(?:\s+do\s+m[êe]s)?\s*:?\s*(?:R\$\s*)?([0-9][0-9.,]*)",
        entity_types: &["fgts"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "ferias",
        pattern: r"(?i)\bf[ée]rias\b[^0-9]*([0-9][0-9.,]*)",
        entity_types: &["vacation"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "decimo_terceiro",
        pattern: r"(?i)(?:13[ºo°]?|d[ée]cimo\s+terceiro)\s*(?:sal[áa]rio)?[^0-9]*([0-9][0-9.,]*)",
        entity_types: &["thirteenth"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "horas_extras",
        pattern: r"(?i)horas?\s+extras?[^0-9]*([0-9][0-9.,]*)",
        entity_types: &["overtime"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "vale_refeicao",
        pattern: r"(?i)vale[\s-]?refei[çc][ãa]o[^0-9]*([0-9][0-9.,]*)",
        entity_types: &["meal_allowance"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "vale_alimentacao",
        pattern: r"(?i)vale[\s-]?alimenta[çc][ãa]o[^0-9]*([0-9][0-9.,]*)",
        entity_types: &["food_allowance"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "plano_saude",
        pattern: r"(?i)plano\s+(?:de\s+)?sa[úu]de[^0-9]*([0-9][0-9.,]*)",
        entity_types: &["health_insurance"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "empresa",
        pattern: r"(?i)(?:empregador|empresa)\s*:\s*(.+)",
        entity_types: &["employer_name", "supplier_name", "company"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "cnpj",
        pattern: r"(?i)CNPJ\s*:?\s*(\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2})",
        entity_types: &["employer_tax_id", "supplier_tax_id", "cnpj"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "funcionario",
        pattern: r"(?i)(?:funcion[áa]rio|colaborador)\s*:\s*(.+)",
        entity_types: &["employee_name", "receiver_name"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "cpf",
        pattern: r"(?i)CPF\s*:?\s*(\d{3}\.\d{3}\.\d{3}-\d{2})",
        entity_types: &["employee_tax_id", "cpf"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "cargo",
        pattern: r"(?i)(?:cargo|fun[çc][ãa]o)\s*:\s*(.+)",
        entity_types: &["job_title", "occupation"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "data_admissao",
        pattern: r"(?i)(?:data\s+(?:de\s+)?)?admiss[ãa]o\s*:?\s*([0-9/.-]+)",
        entity_types: &["admission_date", "hire_date"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "competencia",
        pattern: r"(?i)(?:compet[êe]ncia|m[êe]s\s+de\s+refer[êe]ncia)\s*:?\s*([0-9]{2}/[0-9]{4})",
        entity_types: &["pay_period", "period"],
        monetary: false,
    },
];

const PORTUGAL_SPECS: &[FieldSpec] = &[
    FieldSpec {
        raw_key: "vencimento_base",
        pattern: r"(?i)vencimento(?:\s+base)?\s*:?\s*([0-9][0-9., ]*)",
        entity_types: &["gross_amount", "base_salary"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "liquido_a_receber",
        pattern: r"(?i)l[íi]quido(?:\s+a\s+receber)?\s*:?\s*([0-9][0-9., ]*)",
        entity_types: &["net_amount", "net_salary"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "total_remuneracoes",
        pattern: r"(?i)total\s+(?:de\s+)?remunera[çc][õo]es\s*:?\s*([0-9][0-9., ]*)",
        entity_types: &["total_earnings"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "total_descontos",
        pattern: r"(?i)total\s+(?:de\s+)?descontos\s*:?\s*([0-9][0-9., ]*)",
        entity_types: &["total_deductions"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "seguranca_social",
        pattern: r"(?i)seguran[çc]a\s+social[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["social_security"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "irs",
        pattern: r"(?i)\bIRS\b[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["income_tax", "irs"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "subsidio_ferias",
        pattern: r"(?i)subs[íi]dio\s+(?:de\s+)?f[ée]rias[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["vacation_allowance"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "subsidio_natal",
        pattern: r"(?i)subs[íi]dio\s+(?:de\s+)?natal[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["christmas_allowance"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "subsidio_refeicao",
        pattern: r"(?i)subs[íi]dio\s+(?:de\s+)?(?:refei[çc][ãa]o|alimenta[çc][ãa]o)[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["meal_allowance"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "entidade_patronal",
        pattern: r"(?i)entidade\s+(?:patronal|empregadora)\s*:\s*(.+)",
        entity_types: &["employer_name", "supplier_name"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "nipc",
        pattern: r"(?i)\bNIPC\b\s*:?\s*(\d{9})",
        entity_types: &["employer_tax_id"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "trabalhador",
        pattern: r"(?i)(?:trabalhador|colaborador|nome)\s*:\s*(.+)",
        entity_types: &["employee_name"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "nif",
        pattern: r"(?i)\bNIF\b\s*:?\s*(\d{9})",
        entity_types: &["employee_tax_id", "nif"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "categoria",
        pattern: r"(?i)categoria(?:\s+profissional)?\s*:\s*(.+)",
        entity_types: &["job_title"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "periodo",
        pattern: r"(?i)per[íi]odo\s*:?\s*([0-9]{2}/[0-9]{4})",
        entity_types: &["pay_period", "period"],
        monetary: false,
    },
];

const FRANCE_SPECS: &[FieldSpec] = &[
    FieldSpec {
        raw_key: "salaire_brut",
        pattern: r"(?i)(?:salaire|total)\s+brut\s*:?\s*([0-9][0-9., ]*)",
        entity_types: &["gross_amount", "gross_salary"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "net_a_payer",
        pattern: r"(?i)net\s+[àa]\s+payer[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["net_amount", "net_salary"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "total_cotisations",
        pattern: r"(?i)total\s+(?:des\s+)?cotisations[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["total_deductions"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "cotisations_sociales",
        pattern: r"(?i)cotisations\s+sociales[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["social_security"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "prelevement_a_la_source",
        pattern: r"(?i)pr[ée]l[èe]vement\s+[àa]\s+la\s+source[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["income_tax"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "heures_supplementaires",
        pattern: r"(?i)heures\s+suppl[ée]mentaires[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["overtime"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "titres_restaurant",
        pattern: r"(?i)(?:titres?|tickets?)[\s-]restaurant[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["meal_allowance"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "mutuelle",
        pattern: r"(?i)mutuelle[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["health_insurance"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "prime",
        pattern: r"(?i)\bprime(?:\s+exceptionnelle)?\b[^0-9]*([0-9][0-9., ]*)",
        entity_types: &["bonus"],
        monetary: true,
    },
    FieldSpec {
        raw_key: "employeur",
        pattern: r"(?i)employeur\s*:\s*(.+)",
        entity_types: &["employer_name", "supplier_name"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "siret",
        pattern: r"(?i)\bSIRET\b\s*:?\s*([\d ]{14,20})",
        entity_types: &["employer_tax_id", "siret"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "salarie",
        pattern: r"(?i)(?:salari[ée]|nom)\s*:\s*(.+)",
        entity_types: &["employee_name"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "emploi",
        pattern: r"(?i)(?:emploi|poste|qualification)\s*:\s*(.+)",
        entity_types: &["job_title"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "date_embauche",
        pattern: r"(?i)date\s+d.embauche\s*:?\s*([0-9/.-]+)",
        entity_types: &["hire_date"],
        monetary: false,
    },
    FieldSpec {
        raw_key: "periode",
        pattern: r"(?i)p[ée]riode(?:\s+de\s+paie)?\s*:?\s*([0-9]{2}/[0-9]{4})",
        entity_types: &["pay_period", "period"],
        monetary: false,
    },
];
