//! Sponsor clients, suppliers, their contacts, voucher-type tables and the
//! client/supplier sub-ledgers.

use crate::loader::LoadMode;
use crate::mapper::{FieldSpec, Transform};
use crate::resolver::ReferenceSpec;
use crate::units::{BatchSize, MigrationUnit, ParentFilter};

pub(super) fn units() -> Vec<MigrationUnit> {
    vec![
        clientes(),
        contactos_clientes(),
        proveedores(),
        contactos_proveedores(),
        tip_vent_mod_header(),
        tip_vent_mod_items(),
        tip_comp_mod_header(),
        tip_comp_mod_items(),
        ven_cli_header(),
        ven_cli_items(),
        comp_prov_header(),
        comp_prov_items(),
    ]
}

fn clientes() -> MigrationUnit {
    MigrationUnit {
        name: "clientes",
        source_query: "SELECT Codigo, RazonSocial, Domicilio, Localidad, CodigoPostal, \
                       idProvincia, Tipo1, Telefono1, Tipo2, Telefono2, Tipo3, Telefono3, \
                       tipo4, telefono4, Tipo5, telefono5, tipo6, telefono6, mail, Notas, \
                       Fecha, Vendedor, Hora, idClienteant, Nombre, Apellido, TipoCuenta, \
                       Categoria, Cuit, civa, Cuenta, CuentaSubdiario, FechaNac, Activo, \
                       codigoexterno, vencimiento, horaAtencion, Alerta, cventa, \
                       tablaganancia, idZona, Fechabaja, tipodocto, numerodocto, Descuento, \
                       TipoCuentaComis, ibrutos, percepcionIB, retencionIB, idPais, \
                       Jurisdiccion, Adicional FROM Clientes ORDER BY Codigo"
            .into(),
        target_table: "clientes",
        key_columns: vec!["codigo"],
        source_key_columns: vec!["Codigo"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("codigo", Transform::Copy("Codigo".into())),
            FieldSpec::new("razon_social", Transform::Trim("RazonSocial".into())),
            FieldSpec::new("domicilio", Transform::Trim("Domicilio".into())),
            FieldSpec::new("localidad", Transform::Trim("Localidad".into())),
            FieldSpec::new("codigo_postal", Transform::Trim("CodigoPostal".into())),
            FieldSpec::new("id_provincia", Transform::Copy("idProvincia".into())),
            FieldSpec::new("tipo1", Transform::Copy("Tipo1".into())),
            FieldSpec::new("telefono1", Transform::Trim("Telefono1".into())),
            FieldSpec::new("tipo2", Transform::Copy("Tipo2".into())),
            FieldSpec::new("telefono2", Transform::Trim("Telefono2".into())),
            FieldSpec::new("tipo3", Transform::Copy("Tipo3".into())),
            FieldSpec::new("telefono3", Transform::Trim("Telefono3".into())),
            FieldSpec::new("tipo4", Transform::Copy("tipo4".into())),
            FieldSpec::new("telefono4", Transform::Trim("telefono4".into())),
            FieldSpec::new("tipo5", Transform::Copy("Tipo5".into())),
            FieldSpec::new("telefono5", Transform::Trim("telefono5".into())),
            FieldSpec::new("tipo6", Transform::Copy("tipo6".into())),
            FieldSpec::new("telefono6", Transform::Trim("telefono6".into())),
            FieldSpec::new("mail", Transform::Trim("mail".into())),
            FieldSpec::new("notas", Transform::Copy("Notas".into())),
            FieldSpec::new("fecha", Transform::Copy("Fecha".into())),
            FieldSpec::new("vendedor", Transform::Copy("Vendedor".into())),
            FieldSpec::new("hora", Transform::Copy("Hora".into())),
            FieldSpec::new("id_cliente_ant", Transform::Copy("idClienteant".into())),
            FieldSpec::new("nombre", Transform::Trim("Nombre".into())),
            FieldSpec::new("apellido", Transform::Trim("Apellido".into())),
            FieldSpec::new("tipo_cuenta", Transform::Copy("TipoCuenta".into())),
            FieldSpec::new("categoria", Transform::Copy("Categoria".into())),
            FieldSpec::new("cuit", Transform::Trim("Cuit".into())),
            FieldSpec::new("civa", Transform::Copy("civa".into())),
            FieldSpec::new("cuenta", Transform::Copy("Cuenta".into())),
            FieldSpec::new("cuenta_subdiario", Transform::Copy("CuentaSubdiario".into())),
            FieldSpec::new("fecha_nac", Transform::Copy("FechaNac".into())),
            FieldSpec::new("activo", Transform::Copy("Activo".into())),
            FieldSpec::new("codigo_externo", Transform::Trim("codigoexterno".into())),
            FieldSpec::new("vencimiento", Transform::Copy("vencimiento".into())),
            FieldSpec::new("hora_atencion", Transform::Trim("horaAtencion".into())),
            FieldSpec::new("alerta", Transform::Trim("Alerta".into())),
            FieldSpec::new("cventa", Transform::Copy("cventa".into())),
            FieldSpec::new("tabla_ganancia", Transform::Copy("tablaganancia".into())),
            FieldSpec::new("id_zona", Transform::Copy("idZona".into())),
            FieldSpec::new("fecha_baja", Transform::Copy("Fechabaja".into())),
            FieldSpec::new("tipo_docto", Transform::Copy("tipodocto".into())),
            FieldSpec::new("numero_docto", Transform::Copy("numerodocto".into())),
            FieldSpec::new("descuento", Transform::Copy("Descuento".into())),
            FieldSpec::new("tipo_cuenta_comis", Transform::Copy("TipoCuentaComis".into())),
            FieldSpec::new("ibrutos", Transform::Trim("ibrutos".into())),
            FieldSpec::new("percepcion_ib", Transform::Copy("percepcionIB".into())),
            FieldSpec::new("retencion_ib", Transform::Copy("retencionIB".into())),
            FieldSpec::new("id_pais", Transform::Copy("idPais".into())),
            FieldSpec::new("jurisdiccion", Transform::Copy("Jurisdiccion".into())),
            FieldSpec::new("adicional", Transform::Trim("Adicional".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: Some("codigo"),
    }
}

fn contactos_clientes() -> MigrationUnit {
    MigrationUnit {
        name: "contactos_clientes",
        source_query: "SELECT idContacto, Codigo, nyap, Sector, telefono, mail, observacion, \
                       Nacido, Sucursal, Cargo, Alta, baja FROM ContactosClientes \
                       ORDER BY idContacto"
            .into(),
        target_table: "contactos_clientes",
        key_columns: vec!["id_contacto"],
        source_key_columns: vec!["idContacto"],
        depends_on: vec!["clientes"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: contacto_fields(),
        references: vec![],
        parent_filter: None,
        sequence_column: Some("id_contacto"),
    }
}

fn proveedores() -> MigrationUnit {
    MigrationUnit {
        name: "proveedores",
        source_query: "SELECT Codigo, RazonSocial, Domicilio, Localidad, CodigoPostal, \
                       idProvincia, Cuenta, Tipo1, Telefono1, Tipo2, Telefono2, Tipo3, \
                       Telefono3, tipo4, telefono4, Tipo5, telefono5, tipo6, telefono6, \
                       mail, Notas, Fecha, Vendedor, Hora, idClienteant, Nombre, Apellido, \
                       TipoCuenta, Categoria, Cuit, civa, CuentaSubdiario, FechaNac, Activo, \
                       codigoexterno, vencimiento, horaAtencion, Alerta, cventa, idZona, \
                       fechabaja, TablaGanancia, tipodocto, numerodocto, descuento, ibrutos, \
                       percepcionIB, retencionIB, idPais, Jurisdiccion, Adicional \
                       FROM Proveedores ORDER BY Codigo"
            .into(),
        target_table: "proveedores",
        key_columns: vec!["codigo"],
        source_key_columns: vec!["Codigo"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("codigo", Transform::Copy("Codigo".into())),
            FieldSpec::new("razon_social", Transform::Trim("RazonSocial".into())),
            FieldSpec::new("domicilio", Transform::Trim("Domicilio".into())),
            FieldSpec::new("localidad", Transform::Trim("Localidad".into())),
            FieldSpec::new("codigo_postal", Transform::Trim("CodigoPostal".into())),
            FieldSpec::new("id_provincia", Transform::Copy("idProvincia".into())),
            FieldSpec::new("cuenta", Transform::Copy("Cuenta".into())),
            FieldSpec::new("tipo1", Transform::Copy("Tipo1".into())),
            FieldSpec::new("telefono1", Transform::Trim("Telefono1".into())),
            FieldSpec::new("tipo2", Transform::Copy("Tipo2".into())),
            FieldSpec::new("telefono2", Transform::Trim("Telefono2".into())),
            FieldSpec::new("tipo3", Transform::Copy("Tipo3".into())),
            FieldSpec::new("telefono3", Transform::Trim("Telefono3".into())),
            FieldSpec::new("tipo4", Transform::Copy("tipo4".into())),
            FieldSpec::new("telefono4", Transform::Trim("telefono4".into())),
            FieldSpec::new("tipo5", Transform::Copy("Tipo5".into())),
            FieldSpec::new("telefono5", Transform::Trim("telefono5".into())),
            FieldSpec::new("tipo6", Transform::Copy("tipo6".into())),
            FieldSpec::new("telefono6", Transform::Trim("telefono6".into())),
            FieldSpec::new("mail", Transform::Trim("mail".into())),
            FieldSpec::new("notas", Transform::Copy("Notas".into())),
            FieldSpec::new("fecha", Transform::Copy("Fecha".into())),
            FieldSpec::new("vendedor", Transform::Copy("Vendedor".into())),
            FieldSpec::new("hora", Transform::Copy("Hora".into())),
            FieldSpec::new("id_cliente_ant", Transform::Copy("idClienteant".into())),
            FieldSpec::new("nombre", Transform::Trim("Nombre".into())),
            FieldSpec::new("apellido", Transform::Trim("Apellido".into())),
            FieldSpec::new("tipo_cuenta", Transform::Copy("TipoCuenta".into())),
            FieldSpec::new("categoria", Transform::Copy("Categoria".into())),
            FieldSpec::new("cuit", Transform::Trim("Cuit".into())),
            FieldSpec::new("civa", Transform::Copy("civa".into())),
            FieldSpec::new("cuenta_subdiario", Transform::Copy("CuentaSubdiario".into())),
            FieldSpec::new("fecha_nac", Transform::Copy("FechaNac".into())),
            FieldSpec::new("activo", Transform::Copy("Activo".into())),
            FieldSpec::new("codigo_externo", Transform::Trim("codigoexterno".into())),
            FieldSpec::new("vencimiento", Transform::Copy("vencimiento".into())),
            FieldSpec::new("hora_atencion", Transform::Trim("horaAtencion".into())),
            FieldSpec::new("alerta", Transform::Trim("Alerta".into())),
            FieldSpec::new("cventa", Transform::Copy("cventa".into())),
            FieldSpec::new("id_zona", Transform::Copy("idZona".into())),
            FieldSpec::new("fecha_baja", Transform::Copy("fechabaja".into())),
            FieldSpec::new("tabla_ganancia", Transform::Copy("TablaGanancia".into())),
            FieldSpec::new("tipo_docto", Transform::Copy("tipodocto".into())),
            FieldSpec::new("numero_docto", Transform::Copy("numerodocto".into())),
            FieldSpec::new("descuento", Transform::Copy("descuento".into())),
            FieldSpec::new("ibrutos", Transform::Trim("ibrutos".into())),
            FieldSpec::new("percepcion_ib", Transform::Copy("percepcionIB".into())),
            FieldSpec::new("retencion_ib", Transform::Copy("retencionIB".into())),
            FieldSpec::new("id_pais", Transform::Copy("idPais".into())),
            FieldSpec::new("jurisdiccion", Transform::Copy("Jurisdiccion".into())),
            FieldSpec::new("adicional", Transform::Trim("Adicional".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: Some("codigo"),
    }
}

fn contactos_proveedores() -> MigrationUnit {
    MigrationUnit {
        name: "contactos_proveedores",
        source_query: "SELECT idContacto, Codigo, nyap, Sector, telefono, mail, observacion, \
                       Nacido, Sucursal, Cargo, Alta, baja FROM ContactosProveedores \
                       ORDER BY idContacto"
            .into(),
        target_table: "contactos_proveedores",
        key_columns: vec!["id_contacto"],
        source_key_columns: vec!["idContacto"],
        depends_on: vec!["proveedores"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: contacto_fields(),
        references: vec![],
        parent_filter: None,
        sequence_column: Some("id_contacto"),
    }
}

// ContactosClientes and ContactosProveedores share one shape.
fn contacto_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("id_contacto", Transform::Copy("idContacto".into())),
        FieldSpec::new("codigo", Transform::Copy("Codigo".into())),
        FieldSpec::new("nyap", Transform::Trim("nyap".into())),
        FieldSpec::new("sector", Transform::Trim("Sector".into())),
        FieldSpec::new("telefono", Transform::Trim("telefono".into())),
        FieldSpec::new("mail", Transform::Trim("mail".into())),
        FieldSpec::new("observacion", Transform::Trim("observacion".into())),
        FieldSpec::new("nacido", Transform::Copy("Nacido".into())),
        FieldSpec::new("sucursal", Transform::Trim("Sucursal".into())),
        FieldSpec::new("cargo", Transform::Trim("Cargo".into())),
        FieldSpec::new("alta", Transform::Copy("Alta".into())),
        FieldSpec::new("baja", Transform::Copy("baja".into())),
    ]
}

fn tip_vent_mod_header() -> MigrationUnit {
    MigrationUnit {
        name: "tip_vent_mod_header",
        source_query: "SELECT codigo, comprobante, descripcion, signo, Multiplicador, Sicore, \
                       TipoStock, Modulo, IvaVentas, c_mov, comp, concCompra, IE, WSA, WSB, \
                       WSE, wsc FROM tipventModHeader ORDER BY codigo"
            .into(),
        target_table: "tip_vent_mod_header",
        key_columns: vec!["codigo"],
        source_key_columns: vec!["codigo"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("codigo", Transform::Copy("codigo".into())),
            FieldSpec::new("comprobante", Transform::Trim("comprobante".into())),
            FieldSpec::new("descripcion", Transform::Trim("descripcion".into())),
            FieldSpec::new("signo", Transform::Copy("signo".into())),
            FieldSpec::new("multiplicador", Transform::Copy("Multiplicador".into())),
            FieldSpec::new("sicore", Transform::Trim("Sicore".into())),
            FieldSpec::new("tipo_stock", Transform::Copy("TipoStock".into())),
            FieldSpec::new("modulo", Transform::Copy("Modulo".into())),
            FieldSpec::new("iva_ventas", Transform::Trim("IvaVentas".into())),
            FieldSpec::new("c_mov", Transform::Copy("c_mov".into())),
            FieldSpec::new("comp", Transform::Trim("comp".into())),
            FieldSpec::new("conc_compra", Transform::Trim("concCompra".into())),
            FieldSpec::new("ie", Transform::Copy("IE".into())),
            FieldSpec::new("wsa", Transform::Copy("WSA".into())),
            FieldSpec::new("wsb", Transform::Copy("WSB".into())),
            FieldSpec::new("wse", Transform::Copy("WSE".into())),
            FieldSpec::new("wsc", Transform::Copy("wsc".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: Some("codigo"),
    }
}

fn tip_vent_mod_items() -> MigrationUnit {
    MigrationUnit {
        name: "tip_vent_mod_items",
        source_query: "SELECT codigo, concepto, signo FROM tipventModItems \
                       ORDER BY codigo, concepto"
            .into(),
        target_table: "tip_vent_mod_items",
        key_columns: vec!["codigo", "concepto"],
        source_key_columns: vec!["codigo", "concepto"],
        depends_on: vec!["tip_vent_mod_header"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: tip_item_fields(),
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn tip_comp_mod_header() -> MigrationUnit {
    MigrationUnit {
        name: "tip_comp_mod_header",
        source_query: "SELECT codigo, comprobante, descripcion, signo, Multiplicador, Sicore, \
                       TIpoStock, c_mov, comp, ivaCompras, IE, BR, Modulo \
                       FROM TipCompModHeader ORDER BY codigo"
            .into(),
        target_table: "tip_comp_mod_header",
        key_columns: vec!["codigo"],
        source_key_columns: vec!["codigo"],
        depends_on: vec![],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: vec![
            FieldSpec::new("codigo", Transform::Copy("codigo".into())),
            FieldSpec::new("comprobante", Transform::Trim("comprobante".into())),
            FieldSpec::new("descripcion", Transform::Trim("descripcion".into())),
            FieldSpec::new("signo", Transform::Copy("signo".into())),
            FieldSpec::new("multiplicador", Transform::Copy("Multiplicador".into())),
            FieldSpec::new("sicore", Transform::Trim("Sicore".into())),
            // The legacy column really is spelled TIpoStock on this side.
            FieldSpec::new("tipo_stock", Transform::Copy("TIpoStock".into())),
            FieldSpec::new("c_mov", Transform::Copy("c_mov".into())),
            FieldSpec::new("comp", Transform::Trim("comp".into())),
            FieldSpec::new("iva_compras", Transform::Trim("ivaCompras".into())),
            FieldSpec::new("ie", Transform::Copy("IE".into())),
            FieldSpec::new("br", Transform::Trim("BR".into())),
            FieldSpec::new("modulo", Transform::Copy("Modulo".into())),
        ],
        references: vec![],
        parent_filter: None,
        sequence_column: Some("codigo"),
    }
}

fn tip_comp_mod_items() -> MigrationUnit {
    MigrationUnit {
        name: "tip_comp_mod_items",
        source_query: "SELECT codigo, concepto, signo FROM TipCompModItems \
                       ORDER BY codigo, concepto"
            .into(),
        target_table: "tip_comp_mod_items",
        key_columns: vec!["codigo", "concepto"],
        source_key_columns: vec!["codigo", "concepto"],
        depends_on: vec!["tip_comp_mod_header"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Standard,
        fields: tip_item_fields(),
        references: vec![],
        parent_filter: None,
        sequence_column: None,
    }
}

fn tip_item_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("codigo", Transform::Copy("codigo".into())),
        FieldSpec::new("concepto", Transform::Trim("concepto".into())),
        FieldSpec::new("signo", Transform::Copy("signo".into())),
    ]
}

fn ven_cli_header() -> MigrationUnit {
    MigrationUnit {
        name: "ven_cli_header",
        source_query: "SELECT idtransaccion, comprobante, aniomes, fecha, cliente, \
                       tipocomprobante, nrocomprobante, tipofactura, totalimporte, cancelado, \
                       fecha1venc, fecha2venc, estado, fechareal, centrocosto, \
                       DescripcionImporte, Moneda, ImporteOrigen, TC, doc_c, CanceladoOrigen \
                       FROM VenCliHeader ORDER BY idtransaccion"
            .into(),
        target_table: "ven_cli_header",
        key_columns: vec!["id_transaccion"],
        source_key_columns: vec!["idtransaccion"],
        depends_on: vec!["clientes"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Detail,
        fields: sub_ledger_header_fields("cliente"),
        references: vec![],
        parent_filter: None,
        sequence_column: Some("id_transaccion"),
    }
}

fn ven_cli_items() -> MigrationUnit {
    MigrationUnit {
        name: "ven_cli_items",
        source_query: "SELECT idCampo, idTransaccion, comprobante, aniomes, item, concepto, \
                       cuenta, importe, BaseContable, Area, Detalle, Alicuota, Grilla, Base \
                       FROM Vencliitems ORDER BY idCampo"
            .into(),
        target_table: "ven_cli_items",
        key_columns: vec!["id_campo"],
        source_key_columns: vec!["idCampo"],
        depends_on: vec!["ven_cli_header"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Detail,
        fields: sub_ledger_item_fields(),
        references: vec![ReferenceSpec::new(
            "transacciones",
            "ven_cli_header",
            &["id_transaccion"],
            "id_transaccion",
        )],
        parent_filter: Some(ParentFilter {
            map: "transacciones".into(),
            source_columns: vec!["idTransaccion".into()],
        }),
        sequence_column: Some("id_campo"),
    }
}

fn comp_prov_header() -> MigrationUnit {
    MigrationUnit {
        name: "comp_prov_header",
        source_query: "SELECT idtransaccion, comprobante, aniomes, fecha, proveedor, \
                       tipocomprobante, nrocomprobante, tipofactura, totalimporte, cancelado, \
                       fecha1venc, fecha2venc, estado, fechareal, centrocosto, \
                       DescripcionImporte, Moneda, ImporteOrigen, TC, doc_c, CanceladoOrigen \
                       FROM CompProvHeader ORDER BY idtransaccion"
            .into(),
        target_table: "comp_prov_header",
        key_columns: vec!["id_transaccion"],
        source_key_columns: vec!["idtransaccion"],
        depends_on: vec!["proveedores"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Detail,
        fields: sub_ledger_header_fields("proveedor"),
        references: vec![],
        parent_filter: None,
        sequence_column: Some("id_transaccion"),
    }
}

fn comp_prov_items() -> MigrationUnit {
    let mut fields = sub_ledger_item_fields();
    fields.push(FieldSpec::new("fecha_cierre", Transform::Copy("FechaCierre".into())));
    fields.push(FieldSpec::new("factura", Transform::Trim("Factura".into())));

    MigrationUnit {
        name: "comp_prov_items",
        source_query: "SELECT idCampo, idTransaccion, comprobante, aniomes, item, concepto, \
                       cuenta, importe, BaseContable, Area, Detalle, Alicuota, Grilla, Base, \
                       FechaCierre, Factura FROM CompProvItems ORDER BY idCampo"
            .into(),
        target_table: "comp_prov_items",
        key_columns: vec!["id_campo"],
        source_key_columns: vec!["idCampo"],
        depends_on: vec!["comp_prov_header"],
        mode: LoadMode::DeleteThenInsert,
        batch: BatchSize::Detail,
        fields,
        references: vec![ReferenceSpec::new(
            "transacciones",
            "comp_prov_header",
            &["id_transaccion"],
            "id_transaccion",
        )],
        parent_filter: Some(ParentFilter {
            map: "transacciones".into(),
            source_columns: vec!["idTransaccion".into()],
        }),
        sequence_column: Some("id_campo"),
    }
}

// VenCliHeader and CompProvHeader differ only in the counterparty column.
fn sub_ledger_header_fields(counterparty: &str) -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("id_transaccion", Transform::Copy("idtransaccion".into())),
        FieldSpec::new("comprobante", Transform::Copy("comprobante".into())),
        FieldSpec::new("anio_mes", Transform::Copy("aniomes".into())),
        FieldSpec::new("fecha", Transform::Copy("fecha".into())),
        FieldSpec::new(counterparty, Transform::Copy(counterparty.into())),
        FieldSpec::new("tipo_comprobante", Transform::Copy("tipocomprobante".into())),
        FieldSpec::new("nro_comprobante", Transform::Trim("nrocomprobante".into())),
        FieldSpec::new("tipo_factura", Transform::Trim("tipofactura".into())),
        FieldSpec::new("total_importe", Transform::Copy("totalimporte".into())),
        FieldSpec::new("cancelado", Transform::Copy("cancelado".into())),
        FieldSpec::new("fecha1_venc", Transform::Copy("fecha1venc".into())),
        FieldSpec::new("fecha2_venc", Transform::Copy("fecha2venc".into())),
        FieldSpec::new("estado", Transform::Trim("estado".into())),
        FieldSpec::new("fecha_real", Transform::Copy("fechareal".into())),
        FieldSpec::new("centro_costo", Transform::Copy("centrocosto".into())),
        FieldSpec::new("descripcion_importe", Transform::Trim("DescripcionImporte".into())),
        FieldSpec::new("moneda", Transform::Copy("Moneda".into())),
        FieldSpec::new("importe_origen", Transform::Copy("ImporteOrigen".into())),
        FieldSpec::new("tc", Transform::Copy("TC".into())),
        FieldSpec::new("doc_c", Transform::Copy("doc_c".into())),
        FieldSpec::new("cancelado_origen", Transform::Copy("CanceladoOrigen".into())),
    ]
}

fn sub_ledger_item_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("id_campo", Transform::Copy("idCampo".into())),
        FieldSpec::new("id_transaccion", Transform::Copy("idTransaccion".into())),
        FieldSpec::new("comprobante", Transform::Copy("comprobante".into())),
        FieldSpec::new("anio_mes", Transform::Copy("aniomes".into())),
        FieldSpec::new("item", Transform::Copy("item".into())),
        FieldSpec::new("concepto", Transform::Trim("concepto".into())),
        FieldSpec::new("cuenta", Transform::Copy("cuenta".into())),
        FieldSpec::new("importe", Transform::Copy("importe".into())),
        FieldSpec::new("base_contable", Transform::Copy("BaseContable".into())),
        FieldSpec::new("area", Transform::Copy("Area".into())),
        FieldSpec::new("detalle", Transform::Trim("Detalle".into())),
        FieldSpec::new("alicuota", Transform::Copy("Alicuota".into())),
        FieldSpec::new("grilla", Transform::Trim("Grilla".into())),
        FieldSpec::new("base", Transform::Copy("Base".into())),
    ]
}
