//! Per-country alias tables.
//!
//! For each canonical field, the ordered list of raw keys that country's
//! extraction output may use — earlier entries are preferred. An empty list
//! means the field does not exist in that country's payslips (for example
//! the FGTS pair outside Brazil); normalization then leaves it `None`,
//! which is not an error.

use crate::models::Country;

use super::fields::CanonicalField;

/// Ordered raw-key synonyms for `field` in `country`'s payslips.
pub fn aliases(country: Country, field: CanonicalField) -> &'static [&'static str] {
    match country {
        Country::Brazil => brazil(field),
        Country::Portugal => portugal(field),
        Country::France => france(field),
    }
}

/// Whether `field` exists at all in `country`'s payslips.
pub fn applicable(country: Country, field: CanonicalField) -> bool {
    !aliases(country, field).is_empty()
}

fn brazil(field: CanonicalField) -> &'static [&'static str] {
    use CanonicalField::*;
    match field {
        EmployerName => &["empresa", "empregador", "razao_social"],
        EmployerTaxId => &["cnpj", "cnpj_empresa"],
        EmployeeName => &["funcionario", "nome_funcionario", "nome"],
        EmployeeTaxId => &["cpf", "cpf_funcionario"],
        JobTitle => &["cargo", "funcao"],
        AdmissionDate => &["data_admissao", "admissao"],
        PeriodStart => &["competencia", "periodo", "mes_referencia"],
        PeriodEnd => &["fim_periodo", "data_pagamento"],
        GrossSalary => &["salario_bruto", "salario_base", "vencimento_base", "total_bruto"],
        NetSalary => &["salario_liquido", "liquido_a_receber", "valor_liquido"],
        TotalEarnings => &["total_vencimentos", "total_proventos"],
        TotalDeductions => &["total_descontos", "descontos"],
        SocialSecurity => &["inss", "desconto_inss", "contribuicao_inss"],
        IncomeTax => &["irrf", "irpf", "imposto_renda"],
        PayrollFundBase => &["base_fgts", "fgts_base"],
        PayrollFundDeposit => &["fgts", "deposito_fgts", "fgts_mes"],
        VacationPay => &["ferias", "valor_ferias"],
        VacationBonus => &["adicional_ferias", "terco_ferias"],
        ThirteenthSalary => &["decimo_terceiro", "13_salario", "gratificacao_natalina"],
        Bonus => &["bonus", "gratificacao", "premio"],
        OvertimePay => &["horas_extras", "hora_extra"],
        MealAllowance => &["vale_refeicao", "vr"],
        FoodAllowance => &["vale_alimentacao", "va", "cesta_basica"],
        HealthInsurance => &["plano_saude", "assistencia_medica"],
        DentalInsurance => &["plano_odontologico", "assistencia_odontologica"],
        PrivatePension => &["previdencia_privada", "previdencia_complementar"],
    }
}

fn portugal(field: CanonicalField) -> &'static [&'static str] {
    use CanonicalField::*;
    match field {
        EmployerName => &["entidade_patronal", "empresa", "empregador"],
        EmployerTaxId => &["nipc", "nif_entidade"],
        EmployeeName => &["trabalhador", "colaborador", "nome"],
        EmployeeTaxId => &["nif", "nif_trabalhador"],
        JobTitle => &["categoria", "categoria_profissional", "funcao"],
        AdmissionDate => &["data_admissao", "admissao"],
        PeriodStart => &["periodo", "mes", "data_processamento"],
        PeriodEnd => &["fim_periodo"],
        GrossSalary => &["vencimento_base", "salario_bruto", "vencimento"],
        NetSalary => &["liquido_a_receber", "valor_liquido", "total_liquido"],
        TotalEarnings => &["total_remuneracoes", "total_abonos"],
        TotalDeductions => &["total_descontos", "descontos"],
        SocialSecurity => &["seguranca_social", "desconto_ss", "ss"],
        IncomeTax => &["irs", "retencao_irs"],
        // No FGTS-like fund.
        PayrollFundBase => &[],
        PayrollFundDeposit => &[],
        VacationPay => &["ferias"],
        VacationBonus => &["subsidio_ferias"],
        ThirteenthSalary => &["subsidio_natal", "decimo_terceiro"],
        Bonus => &["premio", "gratificacao", "bonus"],
        OvertimePay => &["trabalho_suplementar", "horas_extraordinarias"],
        MealAllowance => &["subsidio_refeicao", "subsidio_alimentacao"],
        FoodAllowance => &[],
        HealthInsurance => &["seguro_saude"],
        DentalInsurance => &[],
        PrivatePension => &["ppr", "fundo_pensoes"],
    }
}

fn france(field: CanonicalField) -> &'static [&'static str] {
    use CanonicalField::*;
    match field {
        EmployerName => &["employeur", "raison_sociale", "entreprise"],
        EmployerTaxId => &["siret", "siren"],
        EmployeeName => &["salarie", "nom_salarie", "nom"],
        EmployeeTaxId => &["numero_securite_sociale", "nir"],
        JobTitle => &["emploi", "poste", "qualification"],
        AdmissionDate => &["date_embauche", "date_entree"],
        PeriodStart => &["periode", "periode_paie", "mois"],
        PeriodEnd => &["fin_periode"],
        GrossSalary => &["salaire_brut", "brut_total", "salaire_de_base"],
        NetSalary => &["net_a_payer", "salaire_net", "net_paye"],
        TotalEarnings => &["total_brut", "remuneration_totale"],
        TotalDeductions => &["total_retenues", "total_cotisations"],
        SocialSecurity => &["cotisations_sociales", "securite_sociale", "charges_salariales"],
        IncomeTax => &["prelevement_a_la_source", "impot_sur_le_revenu"],
        PayrollFundBase => &[],
        PayrollFundDeposit => &[],
        VacationPay => &["conges_payes", "indemnite_conges_payes"],
        VacationBonus => &[],
        ThirteenthSalary => &["treizieme_mois", "13eme_mois"],
        Bonus => &["prime", "prime_exceptionnelle", "gratification"],
        OvertimePay => &["heures_supplementaires", "heures_sup"],
        MealAllowance => &["titres_restaurant", "tickets_restaurant"],
        FoodAllowance => &[],
        HealthInsurance => &["mutuelle", "complementaire_sante"],
        DentalInsurance => &[],
        PrivatePension => &["retraite_supplementaire", "prevoyance"],
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Country;

    use super::*;

    #[test]
    fn core_financials_are_applicable_everywhere() {
        for country in Country::ALL {
            for field in [
                CanonicalField::GrossSalary,
                CanonicalField::NetSalary,
                CanonicalField::SocialSecurity,
                CanonicalField::IncomeTax,
            ] {
                assert!(applicable(country, field), "{field:?} missing for {country:?}");
            }
        }
    }

    #[test]
    fn payroll_fund_is_brazil_only() {
        assert!(applicable(Country::Brazil, CanonicalField::PayrollFundDeposit));
        assert!(!applicable(Country::Portugal, CanonicalField::PayrollFundDeposit));
        assert!(!applicable(Country::France, CanonicalField::PayrollFundBase));
    }

    #[test]
    fn alias_lists_have_no_duplicates_within_a_country() {
        for country in Country::ALL {
            let mut seen = std::collections::HashSet::new();
            for field in CanonicalField::ALL {
                for alias in aliases(country, field) {
                    assert!(
                        seen.insert(*alias),
                        "alias {alias:?} mapped twice for {country:?}"
                    );
                }
            }
        }
    }
}
